//! In-memory score store for tests.
//!
//! Mirrors the merge semantics of the Mongo pipeline: only `userId`,
//! `username`, `score` and `lastUpdate` are written.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use mongodb::bson::{Bson, DateTime, Document, doc};
use parking_lot::Mutex;

use super::ScoreStore;
use crate::database::models::{ScoreUpdate, numeric};

/// Score store backed by a `HashMap` of documents, counting writes.
#[derive(Default)]
pub struct MemoryScoreStore {
    documents: Mutex<HashMap<String, Document>>,
    writes: AtomicUsize,
    fail: bool,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every write fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Seed a document, keyed by its `_id`.
    pub fn insert(&self, document: Document) {
        let id = document.get_str("_id").unwrap_or_default().to_string();
        self.documents.lock().insert(id, document);
    }

    pub fn get(&self, user_id: &str) -> Option<Document> {
        self.documents.lock().get(user_id).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl ScoreStore for MemoryScoreStore {
    async fn add_score(&self, update: &ScoreUpdate) -> Result<f64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("connection refused"));
        }

        let mut documents = self.documents.lock();
        let prior = match documents.get(&update.user_id).and_then(|d| d.get("score")) {
            None | Some(Bson::Null) => 0.0,
            Some(value) => numeric(value)
                .ok_or_else(|| anyhow!("can't add to a non-numeric score for {}", update.user_id))?,
        };

        let total = prior + update.increment;
        if !total.is_finite() {
            return Err(anyhow!("score total for user {} is not finite", update.user_id));
        }

        let document = documents
            .entry(update.user_id.clone())
            .or_insert_with(|| doc! { "_id": &update.user_id });
        document.insert("userId", &update.user_id);
        document.insert("username", &update.username);
        document.insert("score", total);
        document.insert("lastUpdate", DateTime::now());

        Ok(total)
    }
}
