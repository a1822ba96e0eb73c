//! Persisted set of question ids answered correctly in any past session.

use std::collections::HashSet;
use std::sync::Arc;

use quiz_core::QuestionBank;
use quiz_core::model::QuestionId;
use storage::repository::{KeyValueStore, StorageError};

use crate::error::LedgerError;

/// Key the ledger is stored under.
pub const LEDGER_KEY: &str = "quiz_progress";

/// Append-only history of correctly answered questions.
///
/// Stored as one JSON array of id strings. Every mutation writes the full
/// updated list before returning.
#[derive(Clone)]
pub struct HistoryLedger {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl HistoryLedger {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: LEDGER_KEY.to_string(),
        }
    }

    /// Store the ledger under a different key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the persisted set.
    ///
    /// Never fails: a missing value, a malformed value, or a read error all
    /// yield an empty set.
    pub async fn load(&self) -> HashSet<QuestionId> {
        match self.read().await {
            Ok(ids) => ids.into_iter().collect(),
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "could not read history; treating as empty");
                HashSet::new()
            }
        }
    }

    /// Adds `id` to the persisted set. Recording an id twice changes nothing.
    ///
    /// Returns `true` when the id was not recorded before.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the store cannot be read or written.
    pub async fn record_correct(&self, id: &QuestionId) -> Result<bool, LedgerError> {
        let mut ids = self.read().await?;
        if ids.contains(id) {
            tracing::trace!(%id, "already in history");
            return Ok(false);
        }
        ids.push(id.clone());
        let encoded = serde_json::to_string(&ids)?;
        self.store.set(&self.key, &encoded).await?;
        tracing::debug!(%id, total = ids.len(), "recorded correct answer");
        Ok(true)
    }

    /// Empties the persisted set unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the store cannot be written.
    pub async fn clear(&self) -> Result<(), LedgerError> {
        self.store.remove(&self.key).await?;
        tracing::info!(key = %self.key, "history cleared");
        Ok(())
    }

    /// Number of questions in `bank` that are already recorded.
    pub async fn completed_count(&self, bank: &QuestionBank) -> usize {
        let completed = self.load().await;
        bank.questions()
            .iter()
            .filter(|q| completed.contains(q.id()))
            .count()
    }

    /// Reads the stored ids in recorded order. Malformed content reads as
    /// empty; only store failures are errors.
    async fn read(&self) -> Result<Vec<QuestionId>, StorageError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<QuestionId>>(&raw) {
            Ok(mut ids) => {
                let mut seen = HashSet::with_capacity(ids.len());
                ids.retain(|id| seen.insert(id.clone()));
                Ok(ids)
            }
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    %err,
                    "stored history is malformed; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }
}

impl std::fmt::Debug for HistoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLedger")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
