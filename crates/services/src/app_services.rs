use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use quiz_core::{QuestionBank, Randomizer};
use storage::repository::Storage;

use crate::bank_source::{BankLoader, BankSource, DEFAULT_LOAD_TIMEOUT, DirectoryBankSource};
use crate::error::AppServicesError;
use crate::ledger::HistoryLedger;
use crate::sessions::QuizLoopService;

/// Knobs for assembling app services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub modules_dir: PathBuf,
    pub load_timeout: Duration,
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            modules_dir: PathBuf::from("modules"),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            seed: None,
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn randomizer(&self) -> Randomizer {
        self.seed.map_or_else(Randomizer::thread, Randomizer::seeded)
    }
}

/// Assembles app-facing services: loaded bank, history and the quiz loop.
#[derive(Clone)]
pub struct AppServices {
    bank: Arc<QuestionBank>,
    ledger: HistoryLedger,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and a modules directory.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails. Bank
    /// loading never fails; it falls back to the demo bank.
    pub async fn new_sqlite(db_url: &str, config: &AppConfig) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let source = Arc::new(DirectoryBankSource::new(config.modules_dir.clone()));
        Ok(Self::from_parts(&storage, source, config).await)
    }

    /// Build services from an existing storage and bank source.
    pub async fn from_parts(
        storage: &Storage,
        source: Arc<dyn BankSource>,
        config: &AppConfig,
    ) -> Self {
        let bank = Arc::new(
            BankLoader::new(source)
                .with_timeout(config.load_timeout)
                .load()
                .await,
        );
        if bank.is_demo() {
            tracing::warn!(dir = %config.modules_dir.display(), "running in demo mode");
        }

        let ledger = HistoryLedger::new(Arc::clone(&storage.kv));
        let quiz_loop = Arc::new(
            QuizLoopService::new(Arc::clone(&bank), ledger.clone())
                .with_randomizer(config.randomizer()),
        );

        Self {
            bank,
            ledger,
            quiz_loop,
        }
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
