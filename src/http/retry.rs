//! Retry policies for data-server requests.
//!
//! Both endpoints are idempotent reads, so the client retries them by default.

use crate::error::HttpError;
use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    None,
    /// Retry on transport failures, 429 and 502/503/504.
    #[default]
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// Effective config, `None` when retries are disabled.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::default()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retry attempts after the initial request.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Spread each delay by ±25%.
    pub jitter: bool,
    /// Server-error status codes that trigger a retry. 429 is always retried
    /// and waits for `Retry-After` when the server sends one.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(8),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Whether a failed attempt is worth repeating.
    pub fn should_retry(&self, err: &HttpError) -> bool {
        match err {
            HttpError::ServerError { status, .. } => self.is_retryable_status(*status),
            HttpError::RateLimited { .. } | HttpError::Timeout => true,
            #[cfg(not(target_arch = "wasm32"))]
            HttpError::Reqwest(re) => re.is_connect() || re.is_timeout() || re.is_request(),
            #[cfg(target_arch = "wasm32")]
            HttpError::Reqwest(re) => re.is_timeout() || re.is_request(),
            _ => false,
        }
    }

    /// Wait before retrying after `err`: the server's `Retry-After` when it
    /// gave one, exponential backoff otherwise.
    pub fn wait_after(&self, err: &HttpError, attempt: u32) -> Duration {
        match err {
            HttpError::RateLimited {
                retry_after_ms: Some(ms),
            } => Duration::from_millis(*ms),
            _ => self.delay_for_attempt(attempt),
        }
    }

    /// Delay before retry number `attempt + 1` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(i32::MAX as u32) as i32;
        let base = self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(exponent);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let millis = if self.jitter {
            let spread = capped * 0.25;
            (capped + (rand::random::<f64>() * 2.0 - 1.0) * spread).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(millis as u64)
    }
}
