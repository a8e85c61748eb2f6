//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`. The mutating helpers here are the only place
//! where selection changes are wired into the fetch queues, so every
//! component shares the same debounce/invalidations behavior.

use dioxus::prelude::*;
use mpa_api::dto::{AnomalyResponse, QuantileResponse, Species, TimeseriesResponse};
use mpa_core::batcher::{BatcherSink, FetchBatcher, RANGE_DEBOUNCE_MS, REFRESH_DEBOUNCE_MS};
use mpa_core::region::{Region, RegionId, RegionStore};
use mpa_core::selection::Selection;

/// Current time in milliseconds, for the fetch-queue debounce.
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// The dashboard's data tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Timeseries,
    StandardAnomalies,
    Species,
    Network,
}

/// Shared application state for the conditions dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// All regions on the map.
    pub store: Signal<RegionStore>,
    /// Selected regions plus date/depth/range context.
    pub selection: Signal<Selection>,
    /// Queue for date/range-driven indicator refetches (slow debounce).
    pub range_queue: Signal<FetchBatcher>,
    /// Queue for selection-driven chart refreshes (fast debounce).
    pub refresh_queue: Signal<FetchBatcher>,
    /// Whether the map polygons are still loading.
    pub map_loading: Signal<bool>,
    /// Whether chart data is being fetched.
    pub loading: Signal<bool>,
    /// Error message if something went wrong.
    pub error_msg: Signal<Option<String>>,
    /// Species catalogue for the thermal-range overlay.
    pub species: Signal<Vec<Species>>,
    /// Currently selected species id, if any.
    pub selected_species: Signal<Option<i64>>,
    /// Latest fetched time series for the primary region.
    pub timeseries: Signal<Option<TimeseriesResponse>>,
    /// Latest fetched quantile series for the primary region.
    pub quantiles: Signal<Option<QuantileResponse>>,
    /// Latest fetched standardized-anomaly series for the primary region.
    pub anomalies: Signal<Option<AnomalyResponse>>,
    /// Active data tab.
    pub active_tab: Signal<Tab>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            store: Signal::new(RegionStore::new()),
            selection: Signal::new(Selection::new()),
            range_queue: Signal::new(FetchBatcher::new(RANGE_DEBOUNCE_MS)),
            refresh_queue: Signal::new(FetchBatcher::new(REFRESH_DEBOUNCE_MS)),
            map_loading: Signal::new(true),
            loading: Signal::new(false),
            error_msg: Signal::new(None),
            species: Signal::new(Vec::new()),
            selected_species: Signal::new(None),
            timeseries: Signal::new(None),
            quantiles: Signal::new(None),
            anomalies: Signal::new(None),
            active_tab: Signal::new(Tab::Timeseries),
        }
    }

    /// The most recently selected region, cloned out of the store.
    pub fn primary_region(&self) -> Option<Region> {
        let id = self.selection.read().primary()?;
        self.store.read().get(id).cloned()
    }

    /// Handle a polygon click from the map.
    pub fn click_region(&mut self, id: RegionId, additive: bool) {
        let Some(region) = self.store.read().get(id).cloned() else {
            return;
        };
        let mut selection = self.selection.write();
        let mut queue = self.refresh_queue.write();
        let mut sink = BatcherSink::new(&mut queue, now_ms());
        selection.select_region(&region, additive, &mut sink);
    }

    /// Set the selected date; invalid dates are ignored.
    pub fn set_selected_date(&mut self, raw: &str) -> bool {
        let accepted = {
            let mut selection = self.selection.write();
            let mut queue = self.range_queue.write();
            let mut sink = BatcherSink::new(&mut queue, now_ms());
            selection.set_date(raw, &mut sink)
        };
        if accepted {
            self.invalidate_in_flight();
            // Attached payloads describe the old date; drop them until the
            // refetch lands.
            self.store.write().clear_indicators();
        }
        accepted
    }

    /// Set the start/end window for time-series queries.
    pub fn set_date_range(&mut self, start: &str, end: &str) -> bool {
        let accepted = {
            let mut selection = self.selection.write();
            let mut queue = self.range_queue.write();
            let mut sink = BatcherSink::new(&mut queue, now_ms());
            selection.set_date_range(start, end, &mut sink)
        };
        if accepted {
            self.invalidate_in_flight();
        }
        accepted
    }

    /// Pan the date window by whole years.
    pub fn pan_range(&mut self, years: i32) -> bool {
        let accepted = {
            let mut selection = self.selection.write();
            let mut queue = self.range_queue.write();
            let mut sink = BatcherSink::new(&mut queue, now_ms());
            selection.pan_range(years, &mut sink)
        };
        if accepted {
            self.invalidate_in_flight();
        }
        accepted
    }

    /// Set the depth level from the selector's raw value ("" = aggregate).
    pub fn set_depth(&mut self, raw: &str) -> bool {
        let depth = if raw.is_empty() {
            None
        } else {
            match raw.parse::<i32>() {
                Ok(value) => Some(value),
                Err(_) => return false,
            }
        };
        let known = self
            .primary_region()
            .map(|region| region.depths)
            .unwrap_or_default();
        let accepted = {
            let mut selection = self.selection.write();
            let mut queue = self.range_queue.write();
            let mut sink = BatcherSink::new(&mut queue, now_ms());
            selection.set_depth(depth, &known, &mut sink)
        };
        if accepted {
            self.invalidate_in_flight();
        }
        accepted
    }

    /// Set the quantile thresholds for the heat/cold-wave bounds.
    pub fn set_quantile_band(&mut self, lower: f64, upper: f64) -> bool {
        let mut selection = self.selection.write();
        let mut queue = self.refresh_queue.write();
        let mut sink = BatcherSink::new(&mut queue, now_ms());
        selection.set_quantile_band(lower, upper, &mut sink)
    }

    /// The date/depth/range context moved on: any batch already in flight
    /// must not overwrite state when its response arrives.
    fn invalidate_in_flight(&mut self) {
        self.range_queue.write().invalidate();
        self.refresh_queue.write().invalidate();
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}
