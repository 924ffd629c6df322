//! Wire types for the instrument catalog (`GET /api/coins`).

use serde::{Deserialize, Serialize};

/// Catalog response: the tradable symbols.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstrumentsResponse {
    #[serde(default)]
    pub symbols: Vec<String>,
}
