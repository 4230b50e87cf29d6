//! Score submission plugin.
//!
//! Adds a submitted increment to the user's running total. The increment is
//! trusted as sent: any JSON number is applied unchanged, including negative,
//! zero and fractional values.

use serde_json::Value;
use tracing::info;

use crate::bot::dispatcher::AppState;
use crate::bot::error::{MISSING_FIELDS, SCORE_NOT_NUMBER, WebhookError};
use crate::bot::sender::MessageSender;
use crate::database::{ScoreStore, ScoreUpdate};
use crate::utils::{WebhookResponse, display_key, number_value, username_or_default};

pub const SCORE_RECORDED: &str = "Score recorded successfully";

/// Validate a submission body and apply it to the store.
pub async fn submit_score<S, M>(
    state: &AppState<S, M>,
    payload: &Value,
) -> Result<WebhookResponse, WebhookError>
where
    S: ScoreStore,
    M: MessageSender,
{
    let update = parse_submission(payload)?;
    let new_score = state.store.add_score(&update).await?;

    info!(
        "Recorded {:+} for user {} (@{}), total {}",
        update.increment, update.user_id, update.username, new_score
    );

    Ok(WebhookResponse::success(SCORE_RECORDED).field("newScore", number_value(new_score)))
}

/// Extract `userId`, `score` and `username` from a submission body.
pub fn parse_submission(payload: &Value) -> Result<ScoreUpdate, WebhookError> {
    let user_id = payload.get("userId").and_then(display_key);
    let score = payload.get("score").filter(|v| !v.is_null());

    let (Some(user_id), Some(score)) = (user_id, score) else {
        return Err(WebhookError::Validation(MISSING_FIELDS));
    };

    let increment = score
        .as_f64()
        .ok_or(WebhookError::Validation(SCORE_NOT_NUMBER))?;

    Ok(ScoreUpdate {
        user_id,
        username: username_or_default(payload.get("username")),
        increment,
    })
}
