use thiserror::Error;

/// Errors raised while building, loading or saving a table document.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("table body needs at least one row with at least one cell")]
    EmptyBody,

    #[error("record {record} has {found} fields, expected {expected}")]
    Ragged {
        record: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, GridError>;
