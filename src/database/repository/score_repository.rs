//! Score repository.
//!
//! Applies score submissions to the `users` collection. Each submission is a
//! single `find_one_and_update`, so concurrent submissions for the same user
//! cannot overwrite each other's increments.

use std::future::Future;

use anyhow::{Result, anyhow};
use mongodb::Collection;
use mongodb::bson::{Document, doc};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use tracing::debug;

use crate::database::Database;
use crate::database::models::{ScoreUpdate, numeric};

/// Collection holding one score document per user.
pub const USERS_COLLECTION: &str = "users";

/// Storage for cumulative user scores.
pub trait ScoreStore: Send + Sync + 'static {
    /// Add `update.increment` to the user's total, creating the document on
    /// first use, and return the new total.
    fn add_score(&self, update: &ScoreUpdate) -> impl Future<Output = Result<f64>> + Send;
}

/// MongoDB-backed score store.
#[derive(Clone)]
pub struct ScoreRepository {
    collection: Collection<Document>,
}

impl ScoreRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(USERS_COLLECTION),
        }
    }
}

impl ScoreStore for ScoreRepository {
    async fn add_score(&self, update: &ScoreUpdate) -> Result<f64> {
        let filter = doc! { "_id": &update.user_id };

        let stored = self
            .collection
            .find_one_and_update(filter, score_change(update))
            .with_options(score_options())
            .await?
            .ok_or_else(|| anyhow!("upsert returned no document for user {}", update.user_id))?;

        let total = stored
            .get("score")
            .and_then(numeric)
            .ok_or_else(|| anyhow!("stored score for user {} is not a number", update.user_id))?;

        debug!(
            "Added {} to user {} (@{}), total {}",
            update.increment, update.user_id, update.username, total
        );

        if !total.is_finite() {
            return Err(anyhow!("score total for user {} is not finite", update.user_id));
        }

        Ok(total)
    }
}

/// Update pipeline for one submission.
///
/// A single `$set` stage: the named fields are merged into the document and
/// every other field is left untouched. A missing or `null` score counts
/// as 0. Strings go through `$literal` so names starting with `$` are not
/// read as field paths.
pub fn score_change(update: &ScoreUpdate) -> Vec<Document> {
    vec![doc! {
        "$set": {
            "userId": { "$literal": &update.user_id },
            "username": { "$literal": &update.username },
            "score": { "$add": [{ "$ifNull": ["$score", 0] }, update.increment] },
            "lastUpdate": "$$NOW",
        }
    }]
}

/// Upsert, return the updated document, and read back only the score.
pub fn score_options() -> FindOneAndUpdateOptions {
    FindOneAndUpdateOptions::builder()
        .upsert(true)
        .return_document(ReturnDocument::After)
        .projection(doc! { "score": 1 })
        .build()
}
