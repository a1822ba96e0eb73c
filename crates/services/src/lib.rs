#![forbid(unsafe_code)]

pub mod app_services;
pub mod bank_source;
pub mod error;
pub mod ledger;
pub mod sessions;

pub use quiz_core::Randomizer;
pub use sessions as session;

pub use app_services::{AppConfig, AppServices};
pub use bank_source::{BankLoader, BankSource, DirectoryBankSource, StaticBankSource};
pub use error::{AppServicesError, BankLoadError, LedgerError, SessionError};
pub use ledger::{HistoryLedger, LEDGER_KEY};

pub use sessions::{
    CheckOutcome, QuizLoopService, QuizSession, SessionPhase, SessionProgress, SessionView,
    StartOutcome,
};
