//! Error types for the data-loader crate.
//!
//! Every failure that can happen while reading the raw forecast tables,
//! building timestamps, or writing the cleaned dataset ends up here.

use thiserror::Error;

/// Errors that can occur during data loading and dataset construction
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A CSV record in a data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A date/time string could not be turned into a timestamp
    ///
    /// Raised for both the hourly `date + time` composition and the
    /// condition table's own `date` column. Never coerced to a missing value.
    #[error("Invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Writing the cleaned dataset failed
    #[error("Failed to write {path}: {reason}")]
    WriteError { path: String, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
