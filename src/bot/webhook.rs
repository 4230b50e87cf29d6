//! HTTP webhook endpoint.
//!
//! A single route `/` receives both Telegram updates and score submissions.
//! The route accepts every method so the dispatcher can answer non-POST
//! requests with its own JSON 405.

use axum::Router;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::routing::any;
use teloxide::requests::Requester;
use tracing::{error, info, warn};
use url::Url;

use super::dispatcher::{Readiness, handle_request};
use super::error::INTERNAL_ERROR;
use super::sender::{MessageSender, ThrottledBot};
use crate::database::ScoreStore;
use crate::utils::WebhookResponse;

/// Largest request body accepted.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the webhook router.
pub fn router<S, M>(readiness: Readiness<S, M>) -> Router
where
    S: ScoreStore,
    M: MessageSender,
{
    Router::new()
        .route("/", any(webhook::<S, M>))
        .with_state(readiness)
}

async fn webhook<S, M>(State(readiness): State<Readiness<S, M>>, request: Request) -> WebhookResponse
where
    S: ScoreStore,
    M: MessageSender,
{
    let method = request.method().clone();

    // The body is only read when it will be used.
    if !readiness.is_ready() || method != Method::POST {
        return handle_request(&readiness, &method, b"").await;
    }

    let body = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to read request body: {}", e);
            return WebhookResponse::with_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR,
                &e.to_string(),
            );
        }
    };

    handle_request(&readiness, &method, &body).await
}

/// Point the bot's webhook at `url`.
///
/// Failure is logged only: the service keeps serving score submissions and
/// the webhook can be set manually.
pub async fn register_webhook(bot: &ThrottledBot, url: &Url) {
    info!("🔗 Setting webhook URL: {}", url);

    match bot.inner().set_webhook(url.clone()).await {
        Ok(_) => info!("✅ Webhook registered with Telegram"),
        Err(e) => warn!("Failed to register webhook: {}", e),
    }
}
