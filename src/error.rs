use std::path::PathBuf;

use thiserror::Error;

/// A transaction or budget failed its field constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("unknown transaction type '{0}' (expected income or expense)")]
    UnknownType(String),

    #[error("amount '{0}' is not a number")]
    InvalidAmount(String),

    #[error("amount must be greater than 0")]
    NonPositiveAmount,

    #[error("amount must not exceed {0}")]
    AmountTooLarge(rust_decimal::Decimal),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// The CSV as a whole is unusable; no rows are accepted.
#[derive(Debug, Error)]
pub(crate) enum FormatError {
    #[error(
        "CSV must contain columns: Date, Description, Category, Type, Amount (missing: {})",
        .0.join(", ")
    )]
    MissingColumns(Vec<&'static str>),

    #[error("not a CSV file: {}", .0.display())]
    NotCsv(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// The persistence boundary could not be read or written.
#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The in-memory change was kept; only the write failed.
    #[error("change kept in memory but not saved: {0}")]
    Persistence(#[from] StorageError),
}

#[derive(Debug, Error)]
pub(crate) enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("exported CSV is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}
