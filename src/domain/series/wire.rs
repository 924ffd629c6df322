//! Wire types for series responses (`GET /api/coins/{symbol}`).

use super::Numeric;
use serde::{Deserialize, Serialize};

/// Series response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesResponse {
    #[serde(default)]
    pub data: Vec<RawSample>,
}

/// Timestamp as sent: an ISO 8601 string or Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(i64),
    Text(String),
    Other(serde_json::Value),
}

/// A single sample from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSample {
    #[serde(default)]
    pub timestamp: Option<RawTimestamp>,
    #[serde(default)]
    pub open_interest: Option<Numeric>,
    #[serde(default)]
    pub market_price: Option<Numeric>,
    #[serde(default)]
    pub index_price: Option<Numeric>,
    #[serde(default)]
    pub funding_rate: Option<Numeric>,
    #[serde(default)]
    pub value: Option<Numeric>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_response_full_feed() {
        let json = r#"{
            "data": [
                {
                    "timestamp": "2025-03-01T12:00:00.000Z",
                    "openInterest": 1250000,
                    "marketPrice": "65000.5",
                    "indexPrice": "64990.1",
                    "fundingRate": "0.0001"
                }
            ]
        }"#;
        let resp: SeriesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data.len(), 1);
        let s = &resp.data[0];
        assert_eq!(
            s.timestamp,
            Some(RawTimestamp::Text("2025-03-01T12:00:00.000Z".to_string()))
        );
        assert_eq!(s.open_interest, Some(Numeric::Number(1_250_000.0)));
        assert_eq!(s.market_price, Some(Numeric::Text("65000.5".to_string())));
        assert_eq!(s.value, None);
    }

    #[test]
    fn test_series_response_value_feed_with_millis() {
        let json = r#"{"data":[{"timestamp":1740830400000,"value":3.5}]}"#;
        let resp: SeriesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data[0].timestamp, Some(RawTimestamp::Millis(1740830400000)));
        assert_eq!(resp.data[0].value, Some(Numeric::Number(3.5)));
    }

    #[test]
    fn test_series_response_tolerates_odd_fields() {
        let json = r#"{"data":[{"marketPrice":null,"fundingRate":[1]}]}"#;
        let resp: SeriesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data[0].timestamp, None);
        assert_eq!(resp.data[0].market_price, None);
        assert!(matches!(resp.data[0].funding_rate, Some(Numeric::Other(_))));
    }

    #[test]
    fn test_series_response_missing_data_is_empty() {
        let resp: SeriesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.data.is_empty());
    }
}
