use async_trait::async_trait;
use reqwest::Client;
use spider_core::{MeasurementRecord, SpiderFilters};
use url::Url;

use crate::{parse_records_str, FetchError, RecordSource, SourceConfig};

/// Fetches records from the `get-spider` endpoint.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: Client,
    endpoint: Url,
}

impl HttpRecordSource {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)?.join(config.endpoint.trim_start_matches('/'))?;

        Ok(Self {
            client: build_client(config)?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL; unfiltered requests carry no query string at all.
    pub fn request_url(&self, filters: &SpiderFilters) -> Url {
        let mut url = self.endpoint.clone();
        if !filters.is_unfiltered() {
            url.query_pairs_mut().extend_pairs(filters.query_pairs());
        }
        url
    }

    pub async fn fetch(
        &self,
        filters: &SpiderFilters,
    ) -> Result<Vec<MeasurementRecord>, FetchError> {
        let url = self.request_url(filters);
        tracing::debug!(%url, "fetching spider records");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "record endpoint returned an error");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let records = parse_records_str(&body)?;
        tracing::debug!(%url, records = records.len(), "fetched spider records");
        Ok(records)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl RecordSource for HttpRecordSource {
    async fn fetch_records(
        &self,
        filters: &SpiderFilters,
    ) -> Result<Vec<MeasurementRecord>, FetchError> {
        self.fetch(filters).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &SourceConfig) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()?)
}

#[cfg(target_arch = "wasm32")]
fn build_client(_config: &SourceConfig) -> Result<Client, FetchError> {
    Ok(Client::new())
}
