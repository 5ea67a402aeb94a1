use std::path::{Path, PathBuf};

use async_trait::async_trait;
use spider_core::{MeasurementRecord, SpiderFilters};

use crate::{parse_records_str, FetchError, RecordSource};

/// Reads a saved `get-spider` payload and filters it locally, the same way
/// the endpoint does.
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self, filters: &SpiderFilters) -> Result<Vec<MeasurementRecord>, FetchError> {
        let payload = std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records = parse_records_str(&payload)?;
        let total = records.len();
        let kept = filters.apply(records);
        tracing::debug!(
            path = %self.path.display(),
            total,
            kept = kept.len(),
            "loaded spider records from file"
        );
        Ok(kept)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl RecordSource for FileRecordSource {
    async fn fetch_records(
        &self,
        filters: &SpiderFilters,
    ) -> Result<Vec<MeasurementRecord>, FetchError> {
        self.load(filters)
    }
}
