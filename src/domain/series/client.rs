//! Series sub-client: sample history per instrument.

use crate::client::AnalyticsClient;
use crate::domain::series::SampleSeries;
use crate::error::AnalyticsError;
use crate::shared::InstrumentId;

/// Sub-client for series operations.
pub struct SeriesClient<'a> {
    pub(crate) client: &'a AnalyticsClient,
}

impl<'a> SeriesClient<'a> {
    /// Full history for `instrument`; samples without a usable timestamp are dropped.
    pub async fn get(&self, instrument: &InstrumentId) -> Result<SampleSeries, AnalyticsError> {
        let resp = self.client.http.get_series(instrument.as_str()).await?;
        Ok(SampleSeries::from_response(instrument.clone(), resp))
    }
}
