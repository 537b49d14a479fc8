//! Beep chat API client
//!
//! One cookie-bearing session is established at startup and reused for
//! every outbound call for the lifetime of the process. The beep API
//! authenticates with a session cookie named `token`; all calls are
//! plain form-encoded posts or gets.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

/// Bound on an outbound post so a slow chat API cannot wedge a request
/// handler.
const POST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound chat surface used by the webhook handlers.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Whether the session currently holds an authentication token.
    fn is_logged_in(&self) -> bool;

    /// Create a new post, bounded by a 10 second timeout.
    async fn new_post(&self, title: &str, body: &str) -> Result<()>;
}

/// Cookie-session client for the beep chat API.
pub struct BeepClient {
    base: String,
    base_url: Url,
    client: reqwest::Client,
    jar: Arc<Jar>,
}

impl BeepClient {
    /// Create a client for the given beep base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base)
            .map_err(|e| Error::Config(format!("invalid beep URL {}: {}", base_url, e)))?;

        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            base,
            base_url: parsed,
            client,
            jar,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.base, path))
            .map_err(|e| Error::Chat(format!("invalid endpoint {}: {}", path, e)))
    }

    /// Log in with the configured bot credentials.
    ///
    /// On success the session cookie lands in the jar and
    /// [`ChatApi::is_logged_in`] turns true. A failed login is not
    /// fatal to the gateway; the relay route answers `bot not logged
    /// in` until the process is restarted with working credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = self.endpoint("/api/user/login")?;
        let response = self
            .client
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Chat(format!(
                "login failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Ask the chat API who this session is authenticated as.
    pub async fn whoami(&self) -> Result<String> {
        let url = self.endpoint("/api/user/whoami")?;
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }

    /// End the session everywhere. Best-effort cleanup: callers log a
    /// failure and move on.
    pub async fn full_logout(&self) -> Result<()> {
        let url = self.endpoint("/api/user/full_logout")?;
        self.client.post(url).timeout(POST_TIMEOUT).send().await?;
        Ok(())
    }
}

#[async_trait]
impl ChatApi for BeepClient {
    fn is_logged_in(&self) -> bool {
        let header = match self.jar.cookies(&self.base_url) {
            Some(header) => header,
            None => return false,
        };
        let cookies = match header.to_str() {
            Ok(cookies) => cookies,
            Err(_) => return false,
        };
        cookies.split("; ").any(|pair| {
            matches!(pair.split_once('='), Some(("token", value)) if !value.is_empty())
        })
    }

    async fn new_post(&self, title: &str, body: &str) -> Result<()> {
        let url = self.endpoint("/api/post/new_post")?;
        self.client
            .post(url)
            .timeout(POST_TIMEOUT)
            .form(&[("title", title), ("body", body)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_not_logged_in() {
        let client = BeepClient::new("http://beep.example").unwrap();
        assert!(!client.is_logged_in());
    }

    #[test]
    fn test_token_cookie_marks_session_logged_in() {
        let client = BeepClient::new("http://beep.example").unwrap();
        client
            .jar
            .add_cookie_str("token=abc123", &client.base_url);

        assert!(client.is_logged_in());
    }

    #[test]
    fn test_empty_token_cookie_is_not_logged_in() {
        let client = BeepClient::new("http://beep.example").unwrap();
        client.jar.add_cookie_str("token=", &client.base_url);

        assert!(!client.is_logged_in());
    }

    #[test]
    fn test_other_cookies_do_not_count() {
        let client = BeepClient::new("http://beep.example").unwrap();
        client
            .jar
            .add_cookie_str("session_hint=1", &client.base_url);

        assert!(!client.is_logged_in());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = BeepClient::new("http://beep.example/").unwrap();
        let url = client.endpoint("/api/user/login").unwrap();

        assert_eq!(url.as_str(), "http://beep.example/api/user/login");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(BeepClient::new("not a url").is_err());
    }
}
