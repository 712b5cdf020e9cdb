//! Error types for Pennywise

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A transaction record could not be coerced into the typed schema.
    /// `record` is the record's id, or `#<index>` when it has none.
    #[error("Malformed transaction {record}: invalid {field} ({reason})")]
    MalformedTransaction {
        record: String,
        field: &'static str,
        reason: String,
    },

    /// A transaction file or body whose top level is neither a list nor an
    /// object holding one
    #[error("Invalid transaction document: {0}")]
    InvalidDocument(String),

    #[error("Oracle prediction failed: {0}")]
    OraclePrediction(String),

    #[error("Oracle load error: {0}")]
    OracleLoad(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(
        record: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Error::MalformedTransaction {
            record: record.into(),
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error was caused by bad caller input rather than an
    /// internal fault
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedTransaction { .. } | Error::InvalidDocument(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
