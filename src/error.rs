//! Error types for valutakurs

use thiserror::Error;

/// Main error type for valutakurs
#[derive(Error, Debug)]
pub enum ValutaError {
    /// The response lacks a required dimension (e.g. `TIME_PERIOD`).
    /// Fatal for the whole request: no partial axis is ever produced.
    #[error("Dimension '{0}' not found in the API response")]
    MissingDimension(String),

    #[error("Unknown frequency: {0}")]
    UnknownFrequency(String),

    #[error("No series key mapping for {currency} at {frequency} frequency")]
    UnmappedCurrency { currency: String, frequency: String },

    /// Internal contract violation between the parser and the aligner.
    #[error("Alignment error in series {currency}: {reason}")]
    Alignment { currency: String, reason: String },

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for valutakurs operations
pub type Result<T> = std::result::Result<T, ValutaError>;
