//! Request dispatcher.
//!
//! Every request passes through [`handle_request`]: readiness check, method
//! check, body parse, then either the Telegram flow (body has a `message`)
//! or the score submission flow.

use std::sync::Arc;

use axum::http::Method;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::error::WebhookError;
use super::sender::MessageSender;
use crate::database::ScoreStore;
use crate::plugins;
use crate::utils::WebhookResponse;

/// Shared application state.
pub struct AppState<S, M> {
    /// Score storage.
    pub store: S,

    /// Outbound Telegram messages.
    pub sender: M,

    /// Game opened by the `/start` button.
    pub webapp_url: Url,
}

/// Outcome of startup configuration, checked on every request.
pub enum Readiness<S, M> {
    Ready(Arc<AppState<S, M>>),
    /// Configuration could not be loaded. Every request gets a 500.
    Failed(Arc<str>),
}

impl<S, M> Clone for Readiness<S, M> {
    fn clone(&self) -> Self {
        match self {
            Self::Ready(state) => Self::Ready(Arc::clone(state)),
            Self::Failed(reason) => Self::Failed(Arc::clone(reason)),
        }
    }
}

impl<S, M> Readiness<S, M> {
    pub fn ready(state: AppState<S, M>) -> Self {
        Self::Ready(Arc::new(state))
    }

    pub fn failed(reason: impl Into<Arc<str>>) -> Self {
        Self::Failed(reason.into())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Handle one request and always produce a JSON response.
pub async fn handle_request<S, M>(
    readiness: &Readiness<S, M>,
    method: &Method,
    body: &[u8],
) -> WebhookResponse
where
    S: ScoreStore,
    M: MessageSender,
{
    match dispatch(readiness, method, body).await {
        Ok(response) => response,
        Err(e) => {
            match &e {
                WebhookError::Configuration(reason) => {
                    warn!("Rejecting request, service is misconfigured: {}", reason)
                }
                WebhookError::MethodNotAllowed(_) | WebhookError::Validation(_) => {
                    debug!("Rejecting request: {}", e)
                }
                // Logged with full detail when converted.
                WebhookError::MalformedBody(_) | WebhookError::Upstream(_) => {}
            }
            e.respond()
        }
    }
}

async fn dispatch<S, M>(
    readiness: &Readiness<S, M>,
    method: &Method,
    body: &[u8],
) -> Result<WebhookResponse, WebhookError>
where
    S: ScoreStore,
    M: MessageSender,
{
    let state: &AppState<S, M> = match readiness {
        Readiness::Ready(state) => state.as_ref(),
        Readiness::Failed(reason) => return Err(WebhookError::Configuration(reason.to_string())),
    };

    if *method != Method::POST {
        return Err(WebhookError::MethodNotAllowed(method.to_string()));
    }

    // Invalid UTF-8 is a parse error, never silently replaced.
    let payload: Value = serde_json::from_slice(body)?;

    match payload.get("message").filter(|m| !m.is_null()) {
        Some(message) => Ok(plugins::handle_update(state, message).await),
        None => plugins::submit_score(state, &payload).await,
    }
}

#[cfg(test)]
pub fn test_state<S, M>(store: S, sender: M) -> AppState<S, M> {
    AppState {
        store,
        sender,
        webapp_url: Url::parse("https://game.example.com/play").unwrap(),
    }
}
