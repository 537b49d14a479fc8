//! beephook configuration
//!
//! All settings come from environment variables; `main` loads a `.env`
//! file first if one is present. Credentials and secrets are required
//! and their absence is a fatal startup error.

use crate::error::{Error, Result};

/// Immutable gateway configuration, loaded once at startup and shared
/// by reference into the routing layer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot account name for the beep chat API
    pub bot_username: String,

    /// Bot account password
    pub bot_password: String,

    /// Shared secret gating the `/update` route
    pub reload_secret: String,

    /// Shared secret gating the `/webhook` push-relay route
    pub webhook_secret: String,

    /// Base URL of the beep chat API
    pub beep_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| Error::Config(format!("{} must be set", key)))
        };

        Ok(Self {
            bot_username: require("BOT_USERNAME")?,
            bot_password: require("BOT_PASSWORD")?,
            reload_secret: require("RELOAD_REPO_SECRET")?,
            webhook_secret: require("BEEP_WEBHOOK_SECRET")?,
            beep_url: require("BEEP_URL")?.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        vars(&[
            ("BOT_USERNAME", "beepbot"),
            ("BOT_PASSWORD", "hunter2"),
            ("RELOAD_REPO_SECRET", "reload-secret"),
            ("BEEP_WEBHOOK_SECRET", "webhook-secret"),
            ("BEEP_URL", "http://beep.example"),
        ])
    }

    #[test]
    fn test_loads_complete_environment() {
        let env = full_env();
        let config = Config::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.bot_username, "beepbot");
        assert_eq!(config.webhook_secret, "webhook-secret");
        assert_eq!(config.reload_secret, "reload-secret");
        assert_eq!(config.beep_url, "http://beep.example");
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let mut env = full_env();
        env.remove("BEEP_URL");

        let err = Config::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("BEEP_URL"));
    }

    #[test]
    fn test_trailing_slash_trimmed_from_beep_url() {
        let mut env = full_env();
        env.insert("BEEP_URL".into(), "http://beep.example/".into());

        let config = Config::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.beep_url, "http://beep.example");
    }
}
