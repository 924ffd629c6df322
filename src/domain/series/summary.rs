//! Derived scalars over a windowed series: percentage change and latest values.

use super::{ChartPoint, Metric, Sample};
use crate::error::{DegenerateBaselineError, MalformedSampleError};
use serde::{Deserialize, Serialize};

/// Relative movement of a metric between the first and last sample of a window.
///
/// `magnitude_percent` is the absolute change rounded to two decimals; the
/// direction lives in `is_positive` so display code can pick a sign or arrow
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub magnitude_percent: f64,
    pub is_positive: bool,
}

impl ChangeSummary {
    /// No measurable change. Used for short series and zero baselines.
    pub const NEUTRAL: ChangeSummary = ChangeSummary {
        magnitude_percent: 0.0,
        is_positive: true,
    };

    /// Change from `first` to `last`. A zero change counts as positive.
    pub fn between(first: f64, last: f64) -> Result<Self, DegenerateBaselineError> {
        if first == 0.0 {
            return Err(DegenerateBaselineError);
        }
        let change = (last - first) / first * 100.0;
        if !change.is_finite() {
            return Err(DegenerateBaselineError);
        }
        Ok(Self {
            magnitude_percent: round_2dp(change.abs()),
            is_positive: change >= 0.0,
        })
    }

    /// `↑ 50.00%` / `↓ 33.33%`.
    pub fn arrow_label(&self) -> String {
        let arrow = if self.is_positive { '↑' } else { '↓' };
        format!("{} {:.2}%", arrow, self.magnitude_percent)
    }

    /// `+50.00%` / `-33.33%`.
    pub fn signed_label(&self) -> String {
        let sign = if self.is_positive { '+' } else { '-' };
        format!("{}{:.2}%", sign, self.magnitude_percent)
    }
}

impl Default for ChangeSummary {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage change of `metric` across `samples`.
pub fn summarize(samples: &[Sample], metric: Metric) -> ChangeSummary {
    summarize_by(samples, |s| metric.extract(s))
}

/// Percentage change across `samples` using an arbitrary selector.
///
/// Samples the selector rejects are skipped, so the baseline is the first
/// usable sample and the end point the last usable one. Fewer than two usable
/// samples, or a zero baseline, give [`ChangeSummary::NEUTRAL`].
pub fn summarize_by<F>(samples: &[Sample], selector: F) -> ChangeSummary
where
    F: Fn(&Sample) -> Result<f64, MalformedSampleError>,
{
    change_across(samples, |s| selector(s).ok())
}

/// Percentage change of `metric` across already-projected chart points.
///
/// Points missing the metric are skipped. This is what the dashboard badge
/// shows, so it always describes the points on the chart.
pub fn summarize_points(points: &[ChartPoint], metric: Metric) -> ChangeSummary {
    change_across(points, |p| p.get(metric))
}

fn change_across<T, F>(items: &[T], value: F) -> ChangeSummary
where
    F: Fn(&T) -> Option<f64>,
{
    let first = items
        .iter()
        .enumerate()
        .find_map(|(i, item)| value(item).map(|v| (i, v)));
    let last = items
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, item)| value(item).map(|v| (i, v)));

    let (Some((first_idx, first)), Some((last_idx, last))) = (first, last) else {
        return ChangeSummary::NEUTRAL;
    };
    if first_idx == last_idx {
        return ChangeSummary::NEUTRAL;
    }

    ChangeSummary::between(first, last).unwrap_or_else(|err| {
        tracing::debug!(first, last, error = %err, "Falling back to neutral change");
        ChangeSummary::NEUTRAL
    })
}

/// `metric` on the last sample, `None` for an empty window or a malformed
/// last value.
pub fn latest(samples: &[Sample], metric: Metric) -> Option<f64> {
    latest_by(samples, |s| metric.extract(s))
}

/// Selector applied to the last sample.
pub fn latest_by<F>(samples: &[Sample], selector: F) -> Option<f64>
where
    F: Fn(&Sample) -> Result<f64, MalformedSampleError>,
{
    samples.last().and_then(|s| selector(s).ok())
}

/// `metric` on the last chart point.
pub fn latest_point(points: &[ChartPoint], metric: Metric) -> Option<f64> {
    points.last().and_then(|p| p.get(metric))
}

/// Every metric of the most recent sample, for "current value" tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestValues {
    pub open_interest: Option<f64>,
    pub market_price: Option<f64>,
    pub index_price: Option<f64>,
    pub funding_rate: Option<f64>,
    pub value: Option<f64>,
}

impl LatestValues {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::OpenInterest => self.open_interest,
            Metric::MarketPrice => self.market_price,
            Metric::IndexPrice => self.index_price,
            Metric::FundingRate => self.funding_rate,
            Metric::Value => self.value,
        }
    }

    /// Formatted tile text, `None` when the metric has no value.
    pub fn display(&self, metric: Metric) -> Option<String> {
        self.get(metric).map(|v| metric.format_value(v))
    }
}

/// Every metric of the last well-formed sample in `samples`.
///
/// Trailing samples that fail [`Sample::validate`] are passed over, the same
/// way the chart drops them.
pub fn latest_values(samples: &[Sample]) -> LatestValues {
    let Some(last) = samples.iter().rev().find(|s| s.validate().is_ok()) else {
        return LatestValues::default();
    };
    let last = std::slice::from_ref(last);
    LatestValues {
        open_interest: latest(last, Metric::OpenInterest),
        market_price: latest(last, Metric::MarketPrice),
        index_price: latest(last, Metric::IndexPrice),
        funding_rate: latest(last, Metric::FundingRate),
        value: latest(last, Metric::Value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    fn series(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Sample::at(t0() + TimeDelta::minutes(i as i64)).with(Metric::Value, *v))
            .collect()
    }

    #[test]
    fn test_empty_and_single_are_neutral() {
        let neutral = ChangeSummary {
            magnitude_percent: 0.0,
            is_positive: true,
        };
        assert_eq!(summarize(&[], Metric::Value), neutral);
        assert_eq!(summarize(&series(&[42.0]), Metric::Value), neutral);
    }

    #[test]
    fn test_increase() {
        let summary = summarize(&series(&[100.0, 150.0]), Metric::Value);
        assert_eq!(
            summary,
            ChangeSummary {
                magnitude_percent: 50.0,
                is_positive: true
            }
        );
    }

    #[test]
    fn test_decrease_rounds_to_two_decimals() {
        let summary = summarize(&series(&[150.0, 100.0]), Metric::Value);
        assert_eq!(
            summary,
            ChangeSummary {
                magnitude_percent: 33.33,
                is_positive: false
            }
        );
    }

    #[test]
    fn test_uses_only_first_and_last() {
        let summary = summarize(&series(&[200.0, 1.0, 9999.0, 250.0]), Metric::Value);
        assert_eq!(summary.magnitude_percent, 25.0);
        assert!(summary.is_positive);
    }

    #[test]
    fn test_zero_change_is_positive() {
        let summary = summarize(&series(&[80.0, 95.0, 80.0]), Metric::Value);
        assert_eq!(summary, ChangeSummary::NEUTRAL);
        assert!(summary.is_positive);
    }

    #[test]
    fn test_zero_baseline_is_neutral() {
        assert_eq!(
            summarize(&series(&[0.0, 10.0]), Metric::Value),
            ChangeSummary::NEUTRAL
        );
        assert_eq!(ChangeSummary::between(0.0, 10.0), Err(DegenerateBaselineError));
    }

    #[test]
    fn test_negative_baseline() {
        let summary = ChangeSummary::between(-0.0001, 0.0001).unwrap();
        assert_eq!(summary.magnitude_percent, 200.0);
        assert!(!summary.is_positive);
    }

    #[test]
    fn test_malformed_samples_are_skipped() {
        let mut samples = series(&[100.0, 120.0, 110.0]);
        samples[0].value = Some("bad".into());
        samples[2].value = Some("oops".into());
        // only one usable sample left
        assert_eq!(summarize(&samples, Metric::Value), ChangeSummary::NEUTRAL);

        let mut samples = series(&[100.0, 120.0, 150.0, 0.0]);
        samples[0].value = None;
        samples[3].value = Some("NaN".into());
        let summary = summarize(&samples, Metric::Value);
        assert_eq!(summary.magnitude_percent, 25.0);
        assert!(summary.is_positive);
    }

    #[test]
    fn test_summarize_by_custom_selector() {
        let samples: Vec<Sample> = series(&[100.0, 150.0])
            .into_iter()
            .map(|s| s.with(Metric::MarketPrice, "10").with(Metric::IndexPrice, "20"))
            .collect();
        let spread = |s: &Sample| -> Result<f64, MalformedSampleError> {
            Ok(Metric::IndexPrice.extract(s)? - Metric::MarketPrice.extract(s)?
                + Metric::Value.extract(s)?)
        };
        // 110 → 160
        let summary = summarize_by(&samples, spread);
        assert_eq!(summary.magnitude_percent, 45.45);
        assert!(summary.is_positive);
    }

    #[test]
    fn test_latest() {
        assert_eq!(latest(&[], Metric::Value), None);
        assert_eq!(latest(&series(&[1.0, 2.0, 3.0]), Metric::Value), Some(3.0));
        assert_eq!(latest(&series(&[1.0]), Metric::OpenInterest), None);
    }

    #[test]
    fn test_latest_values() {
        let samples = vec![
            Sample::at(t0()).with(Metric::OpenInterest, 1.0),
            Sample::at(t0())
                .with(Metric::OpenInterest, 2.0)
                .with(Metric::MarketPrice, "65000.5")
                .with(Metric::FundingRate, "-0.0002"),
        ];
        let latest = latest_values(&samples);
        assert_eq!(latest.open_interest, Some(2.0));
        assert_eq!(latest.market_price, Some(65000.5));
        assert_eq!(latest.index_price, None);
        assert_eq!(latest.funding_rate, Some(-0.0002));
        assert_eq!(latest.display(Metric::MarketPrice).as_deref(), Some("$65000.5"));
        assert_eq!(latest.display(Metric::FundingRate).as_deref(), Some("-0.0200%"));
        assert_eq!(latest.display(Metric::IndexPrice), None);
        assert_eq!(latest_values(&[]), LatestValues::default());
    }

    #[test]
    fn test_latest_values_skips_malformed_tail() {
        let samples = vec![
            Sample::at(t0())
                .with(Metric::OpenInterest, 150.0)
                .with(Metric::MarketPrice, "1"),
            Sample::at(t0() + TimeDelta::minutes(1))
                .with(Metric::OpenInterest, 200.0)
                .with(Metric::MarketPrice, "1.5x"),
        ];
        let latest = latest_values(&samples);
        assert_eq!(latest.open_interest, Some(150.0));
        assert_eq!(latest.market_price, Some(1.0));
    }

    #[test]
    fn test_summarize_points() {
        let point = |oi: Option<f64>| ChartPoint {
            label: String::new(),
            date: String::new(),
            full_timestamp: t0(),
            open_interest: oi,
            market_price: None,
            index_price: None,
            funding_rate: None,
            value: None,
        };
        let points = vec![point(None), point(Some(100.0)), point(Some(150.0))];
        let summary = summarize_points(&points, Metric::OpenInterest);
        assert_eq!(summary.magnitude_percent, 50.0);
        assert!(summary.is_positive);
        assert_eq!(latest_point(&points, Metric::OpenInterest), Some(150.0));
        assert_eq!(latest_point(&points, Metric::MarketPrice), None);
        assert_eq!(summarize_points(&[], Metric::OpenInterest), ChangeSummary::NEUTRAL);
    }

    #[test]
    fn test_labels() {
        let up = ChangeSummary::between(100.0, 150.0).unwrap();
        assert_eq!(up.arrow_label(), "↑ 50.00%");
        assert_eq!(up.signed_label(), "+50.00%");
        let down = ChangeSummary::between(150.0, 100.0).unwrap();
        assert_eq!(down.arrow_label(), "↓ 33.33%");
        assert_eq!(down.signed_label(), "-33.33%");
    }
}
