//! HTTP client layer: `AnalyticsHttp` with retry policies.

pub mod client;
pub mod retry;

pub use client::AnalyticsHttp;
pub use retry::{RetryConfig, RetryPolicy};
