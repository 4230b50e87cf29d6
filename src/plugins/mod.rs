//! Request flows.
//!
//! - `start` - Telegram updates (`/start` welcome with web app button)
//! - `score` - Score submissions from the game

pub mod score;
pub mod start;

pub use score::submit_score;
pub use start::handle_update;
