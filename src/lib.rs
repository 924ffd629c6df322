//! # OX.FUN Analytics
//!
//! Time-series market metrics (open interest, prices, funding rate) for a
//! selectable instrument, windowed and shaped for charts.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Samples, lookback windows, chart projection, change summaries (pure, no I/O)
//! 2. **Dashboard**: `DashboardController`: selection state, ticketed fetches, derived view
//! 3. **HTTP API**: `AnalyticsHttp` with retry policies
//! 4. **High-Level Client**: `AnalyticsClient` with nested sub-clients; a `MarketDataSource`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use oxfun_analytics::prelude::*;
//!
//! let client = AnalyticsClient::builder().build()?;
//! let mut dashboard = DashboardController::new(DashboardConfig::default());
//!
//! dashboard.start(&client).await;
//! dashboard.set_window(Window::Last6Hours);
//!
//! let snapshot = dashboard.snapshot();
//! println!("OI {}", snapshot.summary.arrow_label());
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and formatting used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, pipeline.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Dashboard ───────────────────────────────────────────────────────

/// Controller state machine and its data-source seam.
pub mod dashboard;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `AnalyticsClient`: the data-server entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{InstrumentId, Window};

    // Domain types (series pipeline)
    pub use crate::domain::series::chart::{project, project_in, ChartPoint};
    pub use crate::domain::series::summary::{
        latest, latest_point, latest_values, summarize, summarize_by, summarize_points,
        ChangeSummary, LatestValues,
    };
    pub use crate::domain::series::window::filter;
    pub use crate::domain::series::{Metric, Numeric, Sample, SampleSeries};

    // Dashboard
    pub use crate::dashboard::{
        Clock, DashboardConfig, DashboardController, DashboardSnapshot, DashboardView,
        FixedClock, LoadState, MarketDataSource, SeriesRequest, SystemClock,
    };

    // Errors
    pub use crate::error::{AnalyticsError, DegenerateBaselineError, HttpError, MalformedSampleError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_INSTRUMENT};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{AnalyticsClient, AnalyticsClientBuilder, InstrumentsClient, SeriesSubClient};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
