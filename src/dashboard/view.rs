//! Derived, render-ready state for one (series, window) pair.

use crate::domain::series::chart::{self, ChartPoint};
use crate::domain::series::summary::{self, ChangeSummary, LatestValues};
use crate::domain::series::{Metric, SampleSeries};
use crate::shared::Window;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chart points and summaries computed from a single filter pass.
///
/// The change badge and latest value are read off the projected points, so a
/// sample the chart drops never feeds them either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub chart_points: Vec<ChartPoint>,
    /// Change of the primary metric across the window.
    pub summary: ChangeSummary,
    /// Primary metric on the last sample in the window.
    pub latest_value: Option<f64>,
    /// Every metric on the last sample of the whole series.
    pub latest_values: LatestValues,
}

impl DashboardView {
    pub fn compute(
        series: &SampleSeries,
        window: Window,
        metric: Metric,
        now: DateTime<Utc>,
    ) -> Self {
        let filtered = series.window(window, now);
        let chart_points = chart::project(&filtered);
        Self {
            summary: summary::summarize_points(&chart_points, metric),
            latest_value: summary::latest_point(&chart_points, metric),
            latest_values: summary::latest_values(series.samples()),
            chart_points,
        }
    }
}
