//! Repository module - data access layer.

#[cfg(test)]
mod memory;
mod score_repository;

#[cfg(test)]
pub use memory::MemoryScoreStore;
pub use score_repository::{ScoreRepository, ScoreStore};
