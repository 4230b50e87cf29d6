//! Per-user cumulative score.
//!
//! Score documents live in the `users` collection, keyed by the string form
//! of the submitting user's id:
//!
//! - `_id` / `userId` - user id
//! - `username` - last submitted name, [`UNKNOWN_USERNAME`] when absent
//! - `score` - running total of all submitted increments
//! - `lastUpdate` - server time of the last write
//!
//! Writes only touch these fields, so anything else stored on a document
//! survives.

use mongodb::bson::Bson;

/// Placeholder stored when a submission carries no username.
pub const UNKNOWN_USERNAME: &str = "N/A";

/// A validated score submission, ready to be applied to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreUpdate {
    pub user_id: String,
    pub username: String,
    pub increment: f64,
}

/// Numeric value of a stored BSON field.
pub fn numeric(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(f) => Some(*f),
        Bson::Int32(i) => Some(f64::from(*i)),
        Bson::Int64(i) => Some(*i as f64),
        _ => None,
    }
}
