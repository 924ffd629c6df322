//! Seams the controller depends on: the remote data source and the clock.

use crate::domain::series::SampleSeries;
use crate::error::AnalyticsError;
use crate::shared::InstrumentId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Pull-based source of instrument catalogs and sample series.
///
/// Retries and timeouts are the implementation's business; the controller
/// surfaces whatever error comes back.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// All selectable instruments.
    async fn list_instruments(&self) -> Result<Vec<InstrumentId>, AnalyticsError>;

    /// Full sample history for one instrument.
    async fn fetch_series(&self, instrument: &InstrumentId)
        -> Result<SampleSeries, AnalyticsError>;
}

/// Source of "now" for window cutoffs.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
