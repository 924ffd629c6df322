//! Instruments sub-client: catalog queries.

use crate::client::AnalyticsClient;
use crate::error::AnalyticsError;
use crate::shared::InstrumentId;

/// Sub-client for the instrument catalog.
pub struct Instruments<'a> {
    pub(crate) client: &'a AnalyticsClient,
}

impl<'a> Instruments<'a> {
    /// All symbols the data server tracks.
    pub async fn list(&self) -> Result<Vec<InstrumentId>, AnalyticsError> {
        let resp = self.client.http.get_instruments().await?;
        Ok(resp.into())
    }

    /// Symbols matching `query` (case-insensitive substring).
    pub async fn search(&self, query: &str) -> Result<Vec<InstrumentId>, AnalyticsError> {
        let catalog = self.list().await?;
        Ok(super::search(&catalog, query).into_iter().cloned().collect())
    }
}
