//! Chart projection: samples reshaped into presentation-ready points.

use super::{Metric, Sample};
use crate::error::MalformedSampleError;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Hour:minute axis label.
const LABEL_FORMAT: &str = "%H:%M";
/// en-US short date, no zero padding.
const DATE_FORMAT: &str = "%-m/%-d/%Y";
/// en-US date and time for tooltips.
const TOOLTIP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A sample ready for plotting.
///
/// Numeric fields are carried through unchanged; funding rates stay
/// fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub label: String,
    pub date: String,
    /// Unix milliseconds on the wire, like [`Sample::timestamp`].
    #[serde(with = "crate::shared::serde_util::timestamp_ms")]
    pub full_timestamp: DateTime<Utc>,
    pub open_interest: Option<f64>,
    pub market_price: Option<f64>,
    pub index_price: Option<f64>,
    pub funding_rate: Option<f64>,
    pub value: Option<f64>,
}

impl ChartPoint {
    /// Project one sample, labelling its time in `tz`.
    pub fn from_sample<Tz>(sample: &Sample, tz: &Tz) -> Result<Self, MalformedSampleError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        sample.validate()?;

        let parse = |metric: Metric| {
            metric
                .raw(sample)
                .map(|n| n.parse(metric.field_name()))
                .transpose()
        };

        let local = sample.timestamp.with_timezone(tz);
        Ok(Self {
            label: local.format(LABEL_FORMAT).to_string(),
            date: local.format(DATE_FORMAT).to_string(),
            full_timestamp: sample.timestamp,
            open_interest: parse(Metric::OpenInterest)?,
            market_price: parse(Metric::MarketPrice)?,
            index_price: parse(Metric::IndexPrice)?,
            funding_rate: parse(Metric::FundingRate)?,
            value: parse(Metric::Value)?,
        })
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::OpenInterest => self.open_interest,
            Metric::MarketPrice => self.market_price,
            Metric::IndexPrice => self.index_price,
            Metric::FundingRate => self.funding_rate,
            Metric::Value => self.value,
        }
    }
}

/// Project samples using the runtime's local time zone.
pub fn project(samples: &[Sample]) -> Vec<ChartPoint> {
    project_in(samples, &Local)
}

/// Project samples, labelling times in `tz`.
///
/// Malformed samples are logged and skipped; every other sample yields
/// exactly one point, in input order.
pub fn project_in<Tz>(samples: &[Sample], tz: &Tz) -> Vec<ChartPoint>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    samples
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| match ChartPoint::from_sample(sample, tz) {
            Ok(point) => Some(point),
            Err(err) => {
                tracing::warn!(
                    index,
                    timestamp = %sample.timestamp,
                    error = %err,
                    "Skipping malformed sample"
                );
                None
            }
        })
        .collect()
}

/// Full date and time for tooltips, e.g. `3/1/2025, 12:00:00 PM`.
pub fn tooltip_time<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format(TOOLTIP_FORMAT).to_string()
}
