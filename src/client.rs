//! High-level client: `AnalyticsClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the [`MarketDataSource`] implementation
//! the dashboard controller consumes.

use crate::dashboard::MarketDataSource;
use crate::domain::instrument::client::Instruments;
use crate::domain::series::client::SeriesClient;
use crate::domain::series::SampleSeries;
use crate::error::AnalyticsError;
use crate::http::client::DEFAULT_TIMEOUT;
use crate::http::{AnalyticsHttp, RetryPolicy};
use crate::shared::InstrumentId;

use async_trait::async_trait;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::instrument::client::Instruments as InstrumentsClient;
pub use crate::domain::series::client::SeriesClient as SeriesSubClient;

/// Entry point for the data server.
///
/// Provides nested sub-client accessors: `client.instruments()`,
/// `client.series()`.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    pub(crate) http: AnalyticsHttp,
}

impl AnalyticsClient {
    pub fn builder() -> AnalyticsClientBuilder {
        AnalyticsClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn instruments(&self) -> Instruments<'_> {
        Instruments { client: self }
    }

    pub fn series(&self) -> SeriesClient<'_> {
        SeriesClient { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

#[async_trait]
impl MarketDataSource for AnalyticsClient {
    async fn list_instruments(&self) -> Result<Vec<InstrumentId>, AnalyticsError> {
        self.instruments().list().await
    }

    async fn fetch_series(
        &self,
        instrument: &InstrumentId,
    ) -> Result<SampleSeries, AnalyticsError> {
        self.series().get(instrument).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct AnalyticsClientBuilder {
    base_url: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl Default for AnalyticsClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::Idempotent,
        }
    }
}

impl AnalyticsClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn build(self) -> Result<AnalyticsClient, AnalyticsError> {
        Ok(AnalyticsClient {
            http: AnalyticsHttp::with_options(&self.base_url, self.timeout, self.retry_policy)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = AnalyticsClient::builder().build().unwrap();
        assert_eq!(client.base_url(), crate::network::DEFAULT_API_URL);
    }

    #[test]
    fn test_builder_overrides() {
        let client = AnalyticsClient::builder()
            .base_url("http://localhost:8080/")
            .timeout(Duration::from_secs(2))
            .retry_policy(RetryPolicy::None)
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
