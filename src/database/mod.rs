//! Database module exports.

mod models;
mod mongo;
mod repository;

pub use models::*;
pub use mongo::Database;
#[cfg(test)]
pub use repository::MemoryScoreStore;
pub use repository::{ScoreRepository, ScoreStore};
