//! Network URL constants and deployment defaults.

/// Default REST API base URL of the OX.FUN data server.
pub const DEFAULT_API_URL: &str = "https://oxfun-data-server-production.up.railway.app";

/// Instrument selected on startup when the catalog contains it.
pub const DEFAULT_INSTRUMENT: &str = "BTC-USD-SWAP-LIN";
