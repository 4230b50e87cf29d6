//! /start command plugin.
//!
//! Answers `/start` with a welcome message and a button that opens the game
//! as a Telegram web app. Delivery is best effort: Telegram retries webhooks
//! that fail, so a send error is logged and the update is still acknowledged.

use serde_json::Value;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, WebAppInfo};
use tracing::{debug, info, warn};
use url::Url;

use crate::bot::dispatcher::AppState;
use crate::bot::sender::{MessageSender, OutgoingMessage};
use crate::database::ScoreStore;
use crate::utils::{WebhookResponse, html_escape};

pub const START_COMMAND: &str = "/start";
pub const TELEGRAM_PROCESSED: &str = "Telegram command processed";

/// Name used when the chat has no first name.
pub const DEFAULT_FIRST_NAME: &str = "there";

/// Handle the `message` object of a Telegram update.
pub async fn handle_update<S, M>(state: &AppState<S, M>, message: &Value) -> WebhookResponse
where
    S: ScoreStore,
    M: MessageSender,
{
    if let Some(reply) = start_reply(message, &state.webapp_url) {
        let chat_id = reply.chat_id;
        match state.sender.send(reply).await {
            Ok(()) => info!("Sent welcome message to chat {}", chat_id),
            Err(e) => warn!("Failed to send welcome message to chat {}: {:#}", chat_id, e),
        }
    }

    WebhookResponse::success(TELEGRAM_PROCESSED)
}

/// Build the welcome reply for a `/start` message, or `None` for anything else.
pub fn start_reply(message: &Value, webapp_url: &Url) -> Option<OutgoingMessage> {
    let text = message.get("text").and_then(Value::as_str)?;
    if !text.starts_with(START_COMMAND) {
        debug!("Ignoring message text {:?}", text);
        return None;
    }

    let chat = message.get("chat");
    let Some(chat_id) = chat.and_then(|c| c.get("id")).and_then(Value::as_i64) else {
        warn!("Received /start without a usable chat id");
        return None;
    };
    let first_name = chat
        .and_then(|c| c.get("first_name"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FIRST_NAME);

    Some(OutgoingMessage {
        chat_id: ChatId(chat_id),
        text: welcome_text(first_name),
        keyboard: launch_keyboard(webapp_url),
    })
}

pub fn welcome_text(first_name: &str) -> String {
    format!(
        "👋 Hello, <b>{}</b>!\n\n\
         Welcome to the game. Tap <b>Play</b> below to launch it and start collecting points. \
         Your score is saved after every round.",
        html_escape(first_name)
    )
}

/// One button that opens the game inside Telegram.
pub fn launch_keyboard(webapp_url: &Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::web_app(
        "🎮 Play",
        WebAppInfo {
            url: webapp_url.clone(),
        },
    )]])
}
