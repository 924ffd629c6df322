//! Series domain: timestamped market samples and the windowing pipeline.
//!
//! Data flows `wire` → `convert` → [`SampleSeries`] → [`window`] →
//! {[`chart`], [`summary`]}.

pub mod chart;
#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod summary;
pub mod window;
pub mod wire;

use crate::error::MalformedSampleError;
use crate::shared::{fmt, InstrumentId, Window};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub use chart::ChartPoint;
pub use summary::{ChangeSummary, LatestValues};

// ─── Numeric ─────────────────────────────────────────────────────────────────

/// A metric field as the backend sent it.
///
/// Prices and funding rates frequently arrive as decimal strings; anything
/// else the backend might put there is kept so the sample can be reported and
/// skipped instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Numeric {
    /// Parse to a finite `f64`. `field` names the metric for error reporting.
    pub fn parse(&self, field: &'static str) -> Result<f64, MalformedSampleError> {
        let value = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| MalformedSampleError::NonNumeric {
                        field,
                        raw: s.clone(),
                    })?
            }
            Numeric::Other(v) => {
                return Err(MalformedSampleError::NonNumeric {
                    field,
                    raw: v.to_string(),
                })
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(MalformedSampleError::NonFinite { field })
        }
    }
}

impl From<f64> for Numeric {
    fn from(n: f64) -> Self {
        Numeric::Number(n)
    }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Numeric::Text(s.to_string())
    }
}

// ─── Metric ──────────────────────────────────────────────────────────────────

/// Selects one metric field of a [`Sample`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    #[default]
    OpenInterest,
    MarketPrice,
    IndexPrice,
    FundingRate,
    Value,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::OpenInterest,
        Metric::MarketPrice,
        Metric::IndexPrice,
        Metric::FundingRate,
        Metric::Value,
    ];

    /// Backend field name.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::OpenInterest => "openInterest",
            Self::MarketPrice => "marketPrice",
            Self::IndexPrice => "indexPrice",
            Self::FundingRate => "fundingRate",
            Self::Value => "value",
        }
    }

    /// Raw field on a sample, if the deployment sends it.
    pub fn raw<'a>(&self, sample: &'a Sample) -> Option<&'a Numeric> {
        match self {
            Self::OpenInterest => sample.open_interest.as_ref(),
            Self::MarketPrice => sample.market_price.as_ref(),
            Self::IndexPrice => sample.index_price.as_ref(),
            Self::FundingRate => sample.funding_rate.as_ref(),
            Self::Value => sample.value.as_ref(),
        }
    }

    /// Parsed field value; a missing field is an error.
    pub fn extract(&self, sample: &Sample) -> Result<f64, MalformedSampleError> {
        let field = self.field_name();
        self.raw(sample)
            .ok_or(MalformedSampleError::MissingField { field })?
            .parse(field)
    }

    /// Tile text for a value of this metric.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Self::OpenInterest | Self::Value => fmt::format_number(value),
            Self::MarketPrice | Self::IndexPrice => fmt::format_price(value),
            Self::FundingRate => fmt::format_rate_percent(value),
        }
    }

    /// Axis tick text.
    pub fn format_axis(&self, value: f64) -> String {
        match self {
            Self::FundingRate => fmt::format_rate_percent(value),
            _ => fmt::format_compact(value),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

// ─── Sample ──────────────────────────────────────────────────────────────────

/// One timestamped observation.
///
/// Which metric fields are present depends on the deployment: the full feed
/// carries open interest, prices and funding rate, single-metric feeds carry
/// only `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(with = "crate::shared::serde_util::timestamp_ms")]
    pub timestamp: DateTime<Utc>,
    pub open_interest: Option<Numeric>,
    pub market_price: Option<Numeric>,
    pub index_price: Option<Numeric>,
    pub funding_rate: Option<Numeric>,
    pub value: Option<Numeric>,
}

impl Sample {
    /// A sample with no metric fields set.
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            open_interest: None,
            market_price: None,
            index_price: None,
            funding_rate: None,
            value: None,
        }
    }

    pub fn with(mut self, metric: Metric, value: impl Into<Numeric>) -> Self {
        let slot = match metric {
            Metric::OpenInterest => &mut self.open_interest,
            Metric::MarketPrice => &mut self.market_price,
            Metric::IndexPrice => &mut self.index_price,
            Metric::FundingRate => &mut self.funding_rate,
            Metric::Value => &mut self.value,
        };
        *slot = Some(value.into());
        self
    }

    pub fn has_metrics(&self) -> bool {
        Metric::ALL.iter().any(|m| m.raw(self).is_some())
    }

    /// Ok when the sample carries at least one metric and every metric it
    /// carries parses. Samples failing this are left out of charts and
    /// summaries alike.
    pub fn validate(&self) -> Result<(), MalformedSampleError> {
        if !self.has_metrics() {
            return Err(MalformedSampleError::NoMetrics);
        }
        for metric in Metric::ALL {
            if let Some(raw) = metric.raw(self) {
                raw.parse(metric.field_name())?;
            }
        }
        Ok(())
    }
}

// ─── SampleSeries ────────────────────────────────────────────────────────────

/// Samples for one instrument, in the order the source delivered them.
///
/// Replaced wholesale on every fetch; there are no in-place update methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSeries {
    pub instrument: InstrumentId,
    samples: Vec<Sample>,
}

impl SampleSeries {
    pub fn new(instrument: InstrumentId, samples: Vec<Sample>) -> Self {
        Self {
            instrument,
            samples,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Whether timestamps are non-decreasing.
    pub fn is_time_ordered(&self) -> bool {
        window::is_time_ordered(&self.samples)
    }

    /// Samples inside `window` as of `now`.
    pub fn window(&self, window: Window, now: DateTime<Utc>) -> Cow<'_, [Sample]> {
        window::filter(&self.samples, window, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn test_numeric_parses_numbers_and_strings() {
        assert_eq!(Numeric::from(42.5).parse("value").unwrap(), 42.5);
        assert_eq!(Numeric::from(" 0.0001 ").parse("fundingRate").unwrap(), 0.0001);
    }

    #[test]
    fn test_numeric_rejects_garbage() {
        let err = Numeric::from("n/a").parse("marketPrice").unwrap_err();
        assert_eq!(
            err,
            MalformedSampleError::NonNumeric {
                field: "marketPrice",
                raw: "n/a".to_string()
            }
        );
        let err = Numeric::Other(serde_json::json!(true)).parse("value").unwrap_err();
        assert!(matches!(err, MalformedSampleError::NonNumeric { .. }));
    }

    #[test]
    fn test_numeric_rejects_non_finite_strings() {
        let err = Numeric::from("NaN").parse("indexPrice").unwrap_err();
        assert_eq!(err, MalformedSampleError::NonFinite { field: "indexPrice" });
        assert!(Numeric::from("inf").parse("indexPrice").is_err());
    }

    #[test]
    fn test_numeric_untagged_serde() {
        let n: Numeric = serde_json::from_str("12").unwrap();
        assert_eq!(n, Numeric::Number(12.0));
        let s: Numeric = serde_json::from_str("\"65000.5\"").unwrap();
        assert_eq!(s, Numeric::Text("65000.5".to_string()));
        let o: Numeric = serde_json::from_str("{\"x\":1}").unwrap();
        assert!(matches!(o, Numeric::Other(_)));
    }

    #[test]
    fn test_metric_extract_missing_field() {
        let sample = Sample::at(ts(1)).with(Metric::OpenInterest, 10.0);
        assert_eq!(Metric::OpenInterest.extract(&sample).unwrap(), 10.0);
        assert_eq!(
            Metric::FundingRate.extract(&sample).unwrap_err(),
            MalformedSampleError::MissingField {
                field: "fundingRate"
            }
        );
    }

    #[test]
    fn test_metric_formatting() {
        assert_eq!(Metric::OpenInterest.format_value(1234567.891), "1,234,567.891");
        assert_eq!(Metric::MarketPrice.format_value(65000.5), "$65000.5");
        assert_eq!(Metric::FundingRate.format_value(0.0001), "0.0100%");
        assert_eq!(Metric::OpenInterest.format_axis(35_000_000.0), "35M");
        assert_eq!(Metric::FundingRate.format_axis(-0.00025), "-0.0250%");
    }

    #[test]
    fn test_sample_serializes_millis() {
        let sample = Sample::at(Utc.timestamp_millis_opt(1740830400000).unwrap())
            .with(Metric::Value, 1.5);
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["timestamp"], 1740830400000i64);
        let back: Sample = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn test_sample_validate() {
        let good = Sample::at(ts(1))
            .with(Metric::OpenInterest, 10.0)
            .with(Metric::MarketPrice, "65000");
        assert_eq!(good.validate(), Ok(()));
        assert_eq!(Sample::at(ts(1)).validate(), Err(MalformedSampleError::NoMetrics));

        // a bad secondary field spoils the whole sample
        let bad = good.clone().with(Metric::MarketPrice, "1.5x");
        assert!(matches!(
            bad.validate(),
            Err(MalformedSampleError::NonNumeric { field: "marketPrice", .. })
        ));
    }

    #[test]
    fn test_sample_has_metrics() {
        assert!(!Sample::at(ts(1)).has_metrics());
        assert!(Sample::at(ts(1)).with(Metric::Value, 1.0).has_metrics());
    }

    #[test]
    fn test_series_accessors() {
        let series = SampleSeries::new(
            InstrumentId::from("ETH-USD-SWAP-LIN"),
            vec![
                Sample::at(ts(1)).with(Metric::Value, 1.0),
                Sample::at(ts(2)).with(Metric::Value, 2.0),
            ],
        );
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
        assert!(series.is_time_ordered());
        assert_eq!(series.latest().unwrap().timestamp, ts(2));
        assert_eq!(series.window(Window::AllTime, ts(3)).len(), 2);
    }
}
