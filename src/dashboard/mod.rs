//! Dashboard controller: selection state, fetch orchestration and derived view.
//!
//! The controller owns the instrument catalog, the current selection and the
//! fetched series. Every change to the series or the window recomputes the
//! [`DashboardView`] from one filter pass, and consumers read an immutable
//! [`DashboardSnapshot`].
//!
//! Fetches are ticketed: [`DashboardController::select_instrument`] hands out a
//! [`SeriesRequest`] and only the most recent ticket's response is applied, so
//! a slow reply for a previous selection can never overwrite the current one.
//!
//! ```rust,ignore
//! let mut dashboard = DashboardController::new(DashboardConfig::default());
//! dashboard.start(&client).await;
//! dashboard.set_window(Window::Last6Hours);
//! let snapshot = dashboard.snapshot();
//! ```

pub mod source;
pub mod view;

pub use source::{Clock, FixedClock, MarketDataSource, SystemClock};
pub use view::DashboardView;

use crate::domain::series::chart::ChartPoint;
use crate::domain::series::summary::{ChangeSummary, LatestValues};
use crate::domain::series::{Metric, SampleSeries};
use crate::error::AnalyticsError;
use crate::shared::{InstrumentId, Window};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ─── Config ──────────────────────────────────────────────────────────────────

/// Controller settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Selected automatically after the catalog loads, if listed.
    pub preferred_instrument: Option<InstrumentId>,
    /// Metric the change badge and latest value track.
    pub primary_metric: Metric,
    pub default_window: Window,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            preferred_instrument: Some(InstrumentId::from(crate::network::DEFAULT_INSTRUMENT)),
            primary_metric: Metric::OpenInterest,
            default_window: Window::AllTime,
        }
    }
}

impl DashboardConfig {
    pub fn preferred_instrument(mut self, instrument: Option<InstrumentId>) -> Self {
        self.preferred_instrument = instrument;
        self
    }

    pub fn primary_metric(mut self, metric: Metric) -> Self {
        self.primary_metric = metric;
        self
    }

    pub fn default_window(mut self, window: Window) -> Self {
        self.default_window = window;
        self
    }
}

// ─── State ───────────────────────────────────────────────────────────────────

/// Data-loading status shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "camelCase")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Ticket for one in-flight series fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    instrument: InstrumentId,
    generation: u64,
}

impl SeriesRequest {
    pub fn instrument(&self) -> &InstrumentId {
        &self.instrument
    }

    /// Fetch the series this ticket was issued for.
    ///
    /// Does not borrow the controller, so several fetches may be in flight.
    pub async fn fetch<S>(&self, source: &S) -> Result<SampleSeries, AnalyticsError>
    where
        S: MarketDataSource + ?Sized,
    {
        source.fetch_series(&self.instrument).await
    }
}

/// Read-only view of the controller for the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub instrument_catalog: Vec<InstrumentId>,
    pub selected_instrument: Option<InstrumentId>,
    pub selected_window: Window,
    pub load_state: LoadState,
    pub primary_metric: Metric,
    pub chart_points: Vec<ChartPoint>,
    pub summary: ChangeSummary,
    pub latest_value: Option<f64>,
    pub latest_values: LatestValues,
}

// ─── Controller ──────────────────────────────────────────────────────────────

pub struct DashboardController {
    config: DashboardConfig,
    clock: Arc<dyn Clock>,
    instrument_catalog: Vec<InstrumentId>,
    selected_instrument: Option<InstrumentId>,
    current_series: Option<SampleSeries>,
    selected_window: Window,
    load_state: LoadState,
    /// Bumped on every selection change; tickets from older generations are stale.
    generation: u64,
    view: DashboardView,
}

impl DashboardController {
    pub fn new(config: DashboardConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: DashboardConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            selected_window: config.default_window,
            config,
            clock,
            instrument_catalog: Vec::new(),
            selected_instrument: None,
            current_series: None,
            load_state: LoadState::Idle,
            generation: 0,
            view: DashboardView::default(),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────────

    /// Load the catalog and, if listed, the preferred instrument.
    ///
    /// A catalog failure leaves the catalog empty and the state `Failed`;
    /// there is no automatic retry.
    pub async fn start<S>(&mut self, source: &S)
    where
        S: MarketDataSource + ?Sized,
    {
        let catalog = match source.list_instruments().await {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!(error = %err, "Failed to fetch instrument catalog");
                self.load_state =
                    LoadState::Failed(format!("Failed to fetch instrument catalog: {}", err));
                return;
            }
        };

        tracing::info!(instruments = catalog.len(), "Instrument catalog loaded");
        self.instrument_catalog = catalog;

        let preferred = self
            .config
            .preferred_instrument
            .clone()
            .filter(|id| self.instrument_catalog.contains(id));
        match preferred {
            Some(id) => {
                self.load_instrument(source, Some(id)).await;
            }
            None if self.selected_instrument.is_none() => self.load_state = LoadState::Idle,
            None => {}
        }
    }

    /// Change the selection and issue a fetch ticket.
    ///
    /// `None` clears the series and returns to `Idle`. Either way the
    /// previous instrument's data is dropped immediately.
    pub fn select_instrument(&mut self, instrument: Option<InstrumentId>) -> Option<SeriesRequest> {
        self.generation += 1;
        self.selected_instrument = instrument.clone();
        self.current_series = None;

        let Some(instrument) = instrument else {
            self.load_state = LoadState::Idle;
            self.recompute();
            return None;
        };

        self.load_state = LoadState::Loading;
        self.recompute();
        Some(SeriesRequest {
            instrument,
            generation: self.generation,
        })
    }

    /// Apply a fetch result. Returns `false` if the ticket is stale and the
    /// result was discarded.
    pub fn apply_series(
        &mut self,
        request: SeriesRequest,
        result: Result<SampleSeries, AnalyticsError>,
    ) -> bool {
        if !self.is_current(&request) {
            tracing::debug!(
                instrument = %request.instrument,
                generation = request.generation,
                current = self.generation,
                "Discarding stale series response"
            );
            return false;
        }

        match result {
            Ok(series) => {
                tracing::info!(
                    instrument = %request.instrument,
                    samples = series.len(),
                    "Series loaded"
                );
                self.current_series = Some(series);
                self.load_state = LoadState::Loaded;
            }
            Err(err) => {
                tracing::error!(
                    instrument = %request.instrument,
                    error = %err,
                    "Failed to fetch series"
                );
                self.current_series = None;
                self.load_state = LoadState::Failed(format!(
                    "Failed to fetch data for {}: {}",
                    request.instrument, err
                ));
            }
        }
        self.recompute();
        true
    }

    /// Select, fetch and apply in one step.
    pub async fn load_instrument<S>(&mut self, source: &S, instrument: Option<InstrumentId>) -> bool
    where
        S: MarketDataSource + ?Sized,
    {
        let Some(request) = self.select_instrument(instrument) else {
            return true;
        };
        let result = request.fetch(source).await;
        self.apply_series(request, result)
    }

    /// Refetch the current selection, e.g. after a failure.
    pub async fn refresh<S>(&mut self, source: &S) -> bool
    where
        S: MarketDataSource + ?Sized,
    {
        match self.selected_instrument.clone() {
            Some(id) => self.load_instrument(source, Some(id)).await,
            None => false,
        }
    }

    /// Change the lookback window. Local only: no fetch.
    pub fn set_window(&mut self, window: Window) {
        if self.selected_window == window {
            return;
        }
        self.selected_window = window;
        self.recompute();
    }

    fn is_current(&self, request: &SeriesRequest) -> bool {
        request.generation == self.generation
            && self.selected_instrument.as_ref() == Some(&request.instrument)
    }

    fn recompute(&mut self) {
        self.view = match &self.current_series {
            Some(series) => DashboardView::compute(
                series,
                self.selected_window,
                self.config.primary_metric,
                self.clock.now(),
            ),
            None => DashboardView::default(),
        };
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn instrument_catalog(&self) -> &[InstrumentId] {
        &self.instrument_catalog
    }

    pub fn selected_instrument(&self) -> Option<&InstrumentId> {
        self.selected_instrument.as_ref()
    }

    pub fn current_series(&self) -> Option<&SampleSeries> {
        self.current_series.as_ref()
    }

    pub fn selected_window(&self) -> Window {
        self.selected_window
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            instrument_catalog: self.instrument_catalog.clone(),
            selected_instrument: self.selected_instrument.clone(),
            selected_window: self.selected_window,
            load_state: self.load_state.clone(),
            primary_metric: self.config.primary_metric,
            chart_points: self.view.chart_points.clone(),
            summary: self.view.summary,
            latest_value: self.view.latest_value,
            latest_values: self.view.latest_values,
        }
    }
}

impl std::fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("selected_instrument", &self.selected_instrument)
            .field("selected_window", &self.selected_window)
            .field("load_state", &self.load_state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
