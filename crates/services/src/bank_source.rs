//! Finding and reading question modules, with the demo fallback.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::demo::demo_bank;
use quiz_core::{QuestionBank, RawModule, normalize};
use tokio::fs;

use crate::error::BankLoadError;

/// Default upper bound on how long module loading may take.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Supplies named raw question collections.
///
/// Sources resolve with a (possibly empty) list or fail; they never hang
/// past the loader's timeout.
#[async_trait]
pub trait BankSource: Send + Sync {
    /// Load every module this source knows about.
    ///
    /// # Errors
    ///
    /// Returns `BankLoadError` if the source itself cannot be read.
    async fn load_modules(&self) -> Result<Vec<RawModule>, BankLoadError>;
}

/// Reads every `*.json` file in a directory; the file stem is the module name.
#[derive(Debug, Clone)]
pub struct DirectoryBankSource {
    dir: PathBuf,
}

impl DirectoryBankSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn json_files(&self) -> Result<Vec<PathBuf>, BankLoadError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(dir = %self.dir.display(), "modules directory does not exist");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(BankLoadError::ReadDir {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut files = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(source) => {
                    return Err(BankLoadError::ReadDir {
                        path: self.dir.clone(),
                        source,
                    });
                }
            };
            let path = entry.path();
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if !is_json {
                continue;
            }
            let is_file = match entry.file_type().await {
                Ok(kind) if kind.is_symlink() => {
                    fs::metadata(&path).await.is_ok_and(|meta| meta.is_file())
                }
                Ok(kind) => kind.is_file(),
                Err(_) => false,
            };
            if is_file {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl BankSource for DirectoryBankSource {
    async fn load_modules(&self) -> Result<Vec<RawModule>, BankLoadError> {
        let mut modules = Vec::new();
        for path in self.json_files().await? {
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            tracing::trace!(path = %path.display(), "loading module file");

            let text = match fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        %err,
                        "skipping unreadable module file"
                    );
                    continue;
                }
            };
            match serde_json::from_str(&text) {
                Ok(data) => modules.push(RawModule::new(name, data)),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        %err,
                        "skipping module file with invalid JSON"
                    );
                }
            }
        }
        tracing::info!(
            dir = %self.dir.display(),
            modules = modules.len(),
            "loaded question modules"
        );
        Ok(modules)
    }
}

/// Fixed, in-memory modules. Useful for embedding a bank and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticBankSource {
    modules: Vec<RawModule>,
}

impl StaticBankSource {
    #[must_use]
    pub fn new(modules: Vec<RawModule>) -> Self {
        Self { modules }
    }
}

#[async_trait]
impl BankSource for StaticBankSource {
    async fn load_modules(&self) -> Result<Vec<RawModule>, BankLoadError> {
        Ok(self.modules.clone())
    }
}

/// Loads a bank from a source, falling back to the demo bank when nothing
/// usable arrives in time.
#[derive(Clone)]
pub struct BankLoader {
    source: Arc<dyn BankSource>,
    timeout: Duration,
}

impl BankLoader {
    #[must_use]
    pub fn new(source: Arc<dyn BankSource>) -> Self {
        Self {
            source,
            timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the bank. Source failure, timeout, or zero modules all yield
    /// the demo bank, flagged via `QuestionBank::is_demo`.
    pub async fn load(&self) -> QuestionBank {
        let loading = tokio::time::timeout(self.timeout, self.source.load_modules());
        let modules = match loading.await {
            Ok(Ok(modules)) => modules,
            Ok(Err(err)) => {
                tracing::warn!(%err, "question source failed");
                Vec::new()
            }
            Err(_) => {
                let err = BankLoadError::Timeout(self.timeout);
                tracing::warn!(%err, "question source timed out");
                Vec::new()
            }
        };

        match normalize(modules) {
            Ok(bank) => bank,
            Err(err) => {
                tracing::warn!(%err, "using demo questions");
                demo_bank()
            }
        }
    }
}

impl std::fmt::Debug for BankLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankLoader")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
