//! Shared error types for the services crate.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `HistoryLedger` writes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LedgerError {
    #[error("failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while reading question modules from a source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("failed to read modules directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("loading question modules timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors emitted by session services.
///
/// Invalid actions and empty selections are not errors; they are reported
/// through the returned outcome instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("failed to persist history: {0}")]
    Ledger(#[from] LedgerError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
