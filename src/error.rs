//! Error types for wind-eval operations.

use thiserror::Error;

/// Result type alias for wind-eval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, rating or exporting survey data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A required column is missing from the CSV header.
    #[error("Column not found: {column}")]
    MissingColumn {
        /// Exact header name that was expected.
        column: String,
    },

    /// A numeric column holds a value that does not parse as a number.
    #[error("Invalid number at line {line}, column {column}: {value:?}")]
    InvalidNumber {
        /// 1-based line number in the CSV file (header is line 1).
        line: usize,
        /// Column header.
        column: String,
        /// Offending cell content.
        value: String,
    },

    /// A grade or verdict column holds an unknown label.
    #[error("Invalid grade at line {line}, column {column}: {value:?}")]
    InvalidGrade {
        /// 1-based line number in the CSV file (header is line 1).
        line: usize,
        /// Column header.
        column: String,
        /// Offending cell content.
        value: String,
    },

    /// A normalization domain with an empty or inverted range.
    #[error("Invalid domain for {name}: [{min}, {max}] (expected min < max)")]
    InvalidDomain {
        /// Name of the measurement the domain belongs to.
        name: String,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A band table whose edges or labels are inconsistent.
    #[error("Invalid band table {name}: {reason}")]
    InvalidBandTable {
        /// Table name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
