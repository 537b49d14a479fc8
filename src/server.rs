//! HTTP surface of the webhook gateway
//!
//! Three routes: `/webhook` relays a signed push event to the beep chat
//! API, `/update` fast-forwards the local working copy, and `/` reports
//! status. Both POST routes are gated by an `X-Hub-Signature` HMAC
//! check, each against its own shared secret, and nothing downstream
//! runs unless that check passes.

use crate::beep::ChatApi;
use crate::config::Config;
use crate::push::PushEvent;
use crate::repo::SourceRepo;
use crate::signature;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state handed to every request handler.
///
/// Constructed once at startup and never reassigned; handlers only read
/// from it.
#[derive(Clone)]
pub struct AppState {
    /// Immutable gateway configuration
    pub config: Arc<Config>,

    /// Long-lived chat API session
    pub chat: Arc<dyn ChatApi>,

    /// Working copy the gateway serves from
    pub repo: Arc<dyn SourceRepo>,

    /// Identity the bot authenticated as, from the startup whoami call
    pub identity: String,
}

/// Build the gateway router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/webhook", post(webhook))
        .route("/update", post(update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn signature_header(headers: &HeaderMap) -> &str {
    headers
        .get(signature::SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// `POST /webhook` — relay a push event to the chat API.
async fn webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    // Routing already restricts the method; this guard also covers
    // direct handler invocation.
    if method != Method::POST {
        return (StatusCode::BAD_REQUEST, "wrong event type".to_string());
    }

    if !signature::verify(
        signature_header(&headers),
        &body,
        &state.config.webhook_secret,
    ) {
        return (StatusCode::IM_A_TEAPOT, "invalid signature".to_string());
    }

    if !state.chat.is_logged_in() {
        return (StatusCode::OK, "bot not logged in".to_string());
    }

    let event: PushEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("rejecting unparseable push payload: {}", e);
            return (StatusCode::BAD_REQUEST, "bad payload".to_string());
        }
    };

    // Relay is best-effort: a failed post is logged but never surfaced
    // to the webhook caller.
    if let Err(e) = state.chat.new_post(&event.title(), &event.body()).await {
        tracing::warn!("failed to relay push event: {}", e);
    }

    (StatusCode::OK, "updated successfully".to_string())
}

/// `POST /update` — fast-forward the working copy from origin.
async fn update(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    if method != Method::POST {
        return (StatusCode::BAD_REQUEST, "wrong event type".to_string());
    }

    if !signature::verify(
        signature_header(&headers),
        &body,
        &state.config.reload_secret,
    ) {
        return (StatusCode::IM_A_TEAPOT, "invalid signature".to_string());
    }

    tracing::info!("updating bot...");
    match state.repo.pull().await {
        Ok(()) => (StatusCode::OK, "updated successfully".to_string()),
        Err(e) => {
            tracing::error!("pull failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "update failed".to_string(),
            )
        }
    }
}

/// `GET /` — unauthenticated status probe.
async fn index(State(state): State<AppState>) -> String {
    let revision = match state.repo.head_revision().await {
        Ok(revision) => revision,
        Err(e) => {
            tracing::warn!("failed to read HEAD revision: {}", e);
            "unknown".to_string()
        }
    };
    format!(
        "bot running :sunglasses: (commit: {}, user: {})",
        revision, state.identity
    )
}
