//! Record source client: JSON payload parsing plus HTTP and file backed
//! sources of measurement records.

mod file;
mod http;

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spider_core::{ErrorKind, MeasurementRecord, SpiderError, SpiderFilters};

pub use file::FileRecordSource;
pub use http::HttpRecordSource;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_ENDPOINT: &str = "get-spider";

/// Where and how to reach the record endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub endpoint: String,
    /// Ignored on wasm32, where the browser owns request timeouts.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl SourceConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid record endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} responded with HTTP {status}")]
    Status { status: u16, url: String },
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    DataFormat(#[from] SpiderError),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Transport(_) | FetchError::Status { .. } => ErrorKind::Network,
            FetchError::DataFormat(_) => ErrorKind::DataFormat,
            FetchError::InvalidUrl(_) | FetchError::Io { .. } => ErrorKind::Local,
        }
    }
}

/// Anything that can produce measurement records for a set of filters.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait RecordSource {
    async fn fetch_records(
        &self,
        filters: &SpiderFilters,
    ) -> Result<Vec<MeasurementRecord>, FetchError>;
}

/// Parse a record payload from a JSON string.
pub fn parse_records_str(payload: &str) -> Result<Vec<MeasurementRecord>, SpiderError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|err| SpiderError::Payload(err.to_string()))?;
    parse_records_value(&value)
}

/// Parse a record payload from a `serde_json::Value`.
///
/// The payload must be an array; every element must carry the required
/// record fields.
pub fn parse_records_value(payload: &Value) -> Result<Vec<MeasurementRecord>, SpiderError> {
    let items = payload.as_array().ok_or_else(|| {
        SpiderError::Payload(format!(
            "expected an array of records, received {}",
            describe(payload)
        ))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            MeasurementRecord::deserialize(item)
                .map_err(|err| SpiderError::Payload(format!("record {index}: {err}")))
        })
        .collect()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
