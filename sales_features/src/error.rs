//! Error types for the sales_features crate

use biz_calendar::CalendarError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the sales_features crate
#[derive(Debug, Error)]
pub enum FeatureError {
    /// A requested column is absent from the table
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A value in a date column cannot be read as a date
    #[error("Cannot parse date in column '{column}': {value}")]
    DateParse { column: String, value: String },

    /// Malformed parameters, e.g. a non-positive lag offset
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Column contents of an unexpected type
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Error from calendar loading
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, FeatureError>;

impl From<PolarsError> for FeatureError {
    fn from(err: PolarsError) -> Self {
        FeatureError::PolarsError(err.to_string())
    }
}
