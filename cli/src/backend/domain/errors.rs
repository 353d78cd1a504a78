//! Error types shared by the domain and storage layers.

use thiserror::Error;

/// Errors surfaced by the expense tracker core.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Input rejected by validation before any state change
    #[error("{0}")]
    InvalidInput(String),
    /// The balance slot is missing or does not parse as a number
    #[error("balance record is corrupt: {0}")]
    CorruptBalance(String),
    #[error("storage failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger record failure: {0}")]
    Ledger(#[from] csv::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
