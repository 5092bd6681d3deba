//! Error types for data loading and configuration
//!
//! - [`DataError`]   – anything that stops a batch of stock records from being
//!   turned into bodies (empty payloads, duplicate tickers, non-finite metrics,
//!   rejected or malformed server responses)
//! - [`ConfigError`] – scenario file problems and out-of-range parameters

use thiserror::Error;

/// Errors raised by data sources and by batch validation
#[derive(Error, Debug)]
pub enum DataError {
    /// Payload contained no records
    #[error("invalid data: empty stock payload")]
    Empty,

    /// The same ticker appeared more than once in one batch
    #[error("invalid data: duplicate ticker {ticker}")]
    DuplicateTicker {
        /// Offending ticker
        ticker: String,
    },

    /// A numeric metric was NaN or infinite
    #[error("invalid data: {field} of {ticker} is not finite")]
    NonFinite {
        /// Ticker of the bad record
        ticker: String,
        /// Field name as it appears in the JSON payload
        field: &'static str,
    },

    /// Market cap or volume below zero
    #[error("invalid data: {field} of {ticker} is negative ({value})")]
    Negative {
        /// Ticker of the bad record
        ticker: String,
        /// Field name as it appears in the JSON payload
        field: &'static str,
        /// Received value
        value: f64,
    },

    /// Server answered with `success: false`
    #[error("data source rejected request: {0}")]
    Rejected(String),

    /// Payload could not be parsed
    #[error("malformed stock payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Payload could not be read
    #[error("failed to read stock payload: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// True for the errors that mean "the batch itself is unusable",
    /// as opposed to transport or parse failures
    pub fn is_invalid_data(&self) -> bool {
        matches!(
            self,
            DataError::Empty
                | DataError::DuplicateTicker { .. }
                | DataError::NonFinite { .. }
                | DataError::Negative { .. }
        )
    }
}

/// Errors raised while loading or validating a scenario file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A parameter lies outside the range the control surface allows
    #[error("{name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Json source selected without a path
    #[error("data.source is json but data.path is not set")]
    MissingPath,

    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
