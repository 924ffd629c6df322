//! Unified error types.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Malformed sample: {0}")]
    Malformed(#[from] MalformedSampleError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors (catalog / series fetch failures).
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// A single sample could not be turned into usable numbers.
///
/// Never fatal for a batch: the offending sample is dropped and the rest of
/// the series is still projected and summarized.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedSampleError {
    #[error("missing timestamp")]
    MissingTimestamp,

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("field `{field}` is missing")]
    MissingField { field: &'static str },

    #[error("field `{field}` is not numeric: {raw}")]
    NonNumeric { field: &'static str, raw: String },

    #[error("field `{field}` is not finite")]
    NonFinite { field: &'static str },

    #[error("sample carries no metric fields")]
    NoMetrics,
}

/// Percentage change requested against a zero baseline.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("percentage change is undefined for a zero baseline")]
pub struct DegenerateBaselineError;
