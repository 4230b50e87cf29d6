//! Utility functions.
//!
//! Collection of helper functions used across the webhook.

pub mod fields;
pub mod response;

pub use fields::{display_key, number_value, username_or_default};
pub use response::WebhookResponse;

/// Escape text for Telegram's HTML parse mode.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
        assert_eq!(html_escape("Abel"), "Abel");
    }
}
