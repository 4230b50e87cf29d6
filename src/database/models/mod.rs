//! Database models.

pub mod score;

pub use score::{ScoreUpdate, UNKNOWN_USERNAME, numeric};
