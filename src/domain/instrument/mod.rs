//! Instrument domain: the catalog of selectable symbols.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::shared::InstrumentId;

impl From<wire::InstrumentsResponse> for Vec<InstrumentId> {
    fn from(resp: wire::InstrumentsResponse) -> Self {
        resp.symbols.into_iter().map(InstrumentId::from).collect()
    }
}

/// Case-insensitive substring search over a catalog, in catalog order.
///
/// An empty query matches everything.
pub fn search<'a>(catalog: &'a [InstrumentId], query: &str) -> Vec<&'a InstrumentId> {
    let needle = query.trim().to_ascii_lowercase();
    catalog
        .iter()
        .filter(|id| id.as_str().to_ascii_lowercase().contains(&needle))
        .collect()
}
