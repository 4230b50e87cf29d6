//! Outbound Telegram messages.

use std::future::Future;

use teloxide::adaptors::Throttle;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, ParseMode};

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// An HTML message with an inline keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub keyboard: InlineKeyboardMarkup,
}

/// Something that can deliver a message to a Telegram chat.
pub trait MessageSender: Send + Sync + 'static {
    fn send(&self, message: OutgoingMessage) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl MessageSender for ThrottledBot {
    async fn send(&self, message: OutgoingMessage) -> anyhow::Result<()> {
        self.send_message(message.chat_id, message.text)
            .parse_mode(ParseMode::Html)
            .reply_markup(message.keyboard)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
pub use recording::RecordingSender;
