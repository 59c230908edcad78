//! Output error types

use thiserror::Error;

/// Errors that can occur while writing artifacts
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Record {row} does not match the header ({found} columns, expected {expected})")]
    SchemaMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
