//! JSON payloads of the stock endpoints
//!
//! Success: `{"success": true, "count": 80, "data": [ ...records... ]}`
//! Failure: `{"success": false, "error": "message"}`
//!
//! A bare array of records is accepted as well.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::source::{non_empty, DataSource, StockFilter};
use crate::error::DataError;
use crate::market::record::RawStockRecord;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StocksResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<RawStockRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StocksResponse {
    pub fn ok(records: Vec<RawStockRecord>) -> Self {
        Self {
            success: true,
            count: Some(records.len()),
            data: Some(records),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Unwrap the records, turning `success: false` and empty data into errors
    pub fn into_records(self) -> Result<Vec<RawStockRecord>, DataError> {
        if !self.success {
            let message = self.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(DataError::Rejected(message));
        }
        non_empty(self.data.unwrap_or_default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Envelope(StocksResponse),
    Records(Vec<RawStockRecord>),
}

/// Parse either payload shape into a non-empty record list
pub fn parse_payload(text: &str) -> Result<Vec<RawStockRecord>, DataError> {
    match serde_json::from_str::<Payload>(text)? {
        Payload::Envelope(response) => response.into_records(),
        Payload::Records(records) => non_empty(records),
    }
}

/// Reads a saved endpoint response from disk on every fetch
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for JsonFileSource {
    fn name(&self) -> &str {
        "json"
    }

    fn fetch(&mut self, filter: &StockFilter) -> Result<Vec<RawStockRecord>, DataError> {
        debug!(path = %self.path.display(), "reading stock payload");
        let text = fs::read_to_string(&self.path)?;
        let records = parse_payload(&text)?;
        non_empty(filter.apply(records))
    }
}
