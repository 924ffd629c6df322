//! Low-level HTTP client: `AnalyticsHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the sub-clients). Wrapped by [`crate::client::AnalyticsClient`].

use crate::domain::instrument::wire::InstrumentsResponse;
use crate::domain::series::wire::SeriesResponse;
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Low-level HTTP client for the data server REST API.
#[derive(Clone)]
pub struct AnalyticsHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl AnalyticsHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_options(base_url, DEFAULT_TIMEOUT, RetryPolicy::Idempotent)
    }

    pub fn with_options(
        base_url: &str,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Instruments ──────────────────────────────────────────────────────

    pub async fn get_instruments(&self) -> Result<InstrumentsResponse, HttpError> {
        let url = format!("{}/api/coins", self.base_url);
        self.get(&url, self.retry.clone()).await
    }

    // ── Series ───────────────────────────────────────────────────────────

    pub async fn get_series(&self, symbol: &str) -> Result<SeriesResponse, HttpError> {
        let url = format!(
            "{}/api/coins/{}",
            self.base_url,
            urlencoding::encode(symbol)
        );
        self.get(&url, self.retry.clone()).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_get(url).await;
        };

        let mut attempt = 0;
        loop {
            let err = match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(err) => err,
            };
            if !config.should_retry(&err) {
                return Err(err);
            }
            if attempt >= config.max_retries {
                return Err(HttpError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_error: err.to_string(),
                });
            }

            let wait = config.wait_after(&err, attempt);
            tracing::debug!(
                url,
                attempt = attempt + 1,
                max = config.max_retries,
                wait_ms = wait.as_millis() as u64,
                error = %err,
                "Retrying request"
            );
            futures_timer::Delay::new(wait).await;
            attempt += 1;
        }
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1000));
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            408 => Err(HttpError::Timeout),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl std::fmt::Debug for AnalyticsHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsHttp")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish()
    }
}
