//! The four data tabs: each hosts one chart variant on its own surface.

use chrono::Datelike;
use dioxus::prelude::*;
use mpa_api::dto::{AnomalyResponse, QuantileResponse, TimeseriesResponse};
use mpa_chart_ui::components::{ChartPanel, LegendPanel, QuantileControls, SpeciesSelector};
use mpa_chart_ui::js_bridge;
use mpa_chart_ui::state::AppState;
use mpa_charts::anomaly::AnomalySample;
use mpa_charts::dial::DialSpec;
use mpa_charts::legend::Legend;
use mpa_charts::lifecycle::ChartView;
use mpa_charts::network::{comparison_chart, comparison_entries};
use mpa_charts::quantile::QuantileSample;
use mpa_charts::species::SpeciesOverlay;
use mpa_charts::timeseries::SeriesSample;
use mpa_charts::variant::{
    AnomalyChart, ChartInput, ChartVariant, QuantileChart, SpeciesChart, TimeseriesChart,
};
use mpa_core::region::Region;

pub const TIMESERIES_CANVAS_ID: &str = "mpa-ts-quantile-chart";
pub const ANOMALY_CANVAS_ID: &str = "mpa-stda-chart";
pub const SPECIES_CANVAS_ID: &str = "mpa-species-chart";
pub const NETWORK_CANVAS_ID: &str = "mpa-network-chart";
pub const DIAL_ID: &str = "mpa-risk-dial";

fn series_samples(response: &TimeseriesResponse) -> Vec<SeriesSample> {
    response
        .data
        .iter()
        .filter_map(|point| {
            Some(SeriesSample {
                day: point.day()?,
                value: point.ts_data,
                climatology: point.clim,
                observation: point.observation,
            })
        })
        .collect()
}

fn quantile_samples(response: &QuantileResponse) -> Vec<QuantileSample> {
    response
        .data
        .iter()
        .filter_map(|point| {
            Some(QuantileSample {
                day: point.day()?,
                upper: point.upperq,
                lower: point.lowerq,
            })
        })
        .collect()
}

fn anomaly_samples(response: &AnomalyResponse) -> Vec<AnomalySample> {
    response
        .samples()
        .into_iter()
        .map(|(day, value)| AnomalySample {
            year: day.year(),
            value,
        })
        .collect()
}

/// Build, lifecycle-check and hand one variant's spec to the JS bridge.
fn render_variant(
    mut view: Signal<ChartView>,
    mut legend: Signal<Legend>,
    variant: &dyn ChartVariant,
    input: &ChartInput,
    state: &AppState,
) {
    let ticket = view.write().begin_refresh();
    let mut spec = variant.build(input);
    if let Some(date) = state.selection.read().selected_date() {
        spec.indicate_date(date);
    }
    let command = view.write().apply(ticket, spec);
    if let Some(command) = command {
        if command.destroy_previous {
            js_bridge::destroy_chart(&command.surface_id);
        }
        js_bridge::render_chart(&command.surface_id, &command.config_json);
        if let Some(spec) = view.read().spec() {
            legend.set(Legend::build(&variant.legend_sections(), &spec.datasets));
        }
    }
}

/// Toggle one dataset from the legend without rebuilding the chart.
fn toggle_dataset(
    mut view: Signal<ChartView>,
    mut legend: Signal<Legend>,
    canvas_id: &str,
    index: usize,
) {
    let mut view_guard = view.write();
    if let Some(spec) = view_guard.spec_mut() {
        legend.write().toggle_entry(index, &mut spec.datasets);
        if let Some(dataset) = spec.datasets.get(index) {
            js_bridge::set_dataset_hidden(canvas_id, index, dataset.hidden);
        }
    }
}

/// Temperature time series with quantile thresholds and the risk dial.
#[component]
pub fn TimeseriesTab() -> Element {
    let state = use_context::<AppState>();
    let view = use_signal(|| ChartView::new(TIMESERIES_CANVAS_ID));
    let mut legend = use_signal(Legend::default);
    let mut surface_ready = use_signal(|| false);

    use_effect(move || {
        let ready = surface_ready();
        let timeseries = state.timeseries.read().clone();
        let quantiles = state.quantiles.read().clone().unwrap_or_default();
        let band = state.selection.read().band();
        if !ready {
            return;
        }
        let Some(timeseries) = timeseries else {
            return;
        };
        let input = ChartInput {
            region_name: state.primary_region().map(|r| r.name).unwrap_or_default(),
            samples: series_samples(&timeseries),
            quantiles: quantile_samples(&quantiles),
            band,
            ..ChartInput::default()
        };
        // Plain time series until the threshold data arrives.
        if input.quantiles.is_empty() {
            render_variant(view, legend, &TimeseriesChart, &input, &state);
        } else {
            render_variant(view, legend, &QuantileChart, &input, &state);
        }
    });

    // The dial tracks the primary region's latest indicator payload.
    use_effect(move || {
        if let Some(snapshot) = state.primary_region().and_then(|region| region.indicator) {
            js_bridge::render_dial(DIAL_ID, &DialSpec::from_snapshot(&snapshot).to_config_json());
        }
    });

    rsx! {
        div {
            style: "display: flex; gap: 12px;",
            div {
                style: "width: 240px;",
                QuantileControls {}
                div {
                    style: "text-align: center; margin-top: 12px;",
                    input { id: "{DIAL_ID}", r#type: "text", class: "dial", readonly: true }
                    p { style: "font-size: 11px; color: #888;", "Heat/Cold wave indicator" }
                }
            }
            div {
                style: "flex: 1; position: relative;",
                LegendPanel {
                    legend: legend(),
                    on_toggle: move |index| toggle_dataset(view, legend, TIMESERIES_CANVAS_ID, index),
                    on_toggle_panel: move |_| legend.write().toggle_panel(),
                }
                ChartPanel {
                    id: TIMESERIES_CANVAS_ID.to_string(),
                    loading: (state.loading)(),
                    on_ready: move |_| surface_ready.set(true),
                }
            }
        }
    }
}

/// Yearly standardized anomalies.
#[component]
pub fn AnomalyTab() -> Element {
    let state = use_context::<AppState>();
    let view = use_signal(|| ChartView::new(ANOMALY_CANVAS_ID));
    let legend = use_signal(Legend::default);
    let mut surface_ready = use_signal(|| false);

    use_effect(move || {
        let ready = surface_ready();
        let anomalies = state.anomalies.read().clone();
        if !ready {
            return;
        }
        let Some(anomalies) = anomalies else {
            return;
        };
        let input = ChartInput {
            region_name: state.primary_region().map(|r| r.name).unwrap_or_default(),
            anomalies: anomaly_samples(&anomalies),
            ..ChartInput::default()
        };
        render_variant(view, legend, &AnomalyChart, &input, &state);
    });

    rsx! {
        div {
            style: "position: relative;",
            ChartPanel {
                id: ANOMALY_CANVAS_ID.to_string(),
                loading: (state.loading)(),
                on_ready: move |_| surface_ready.set(true),
            }
        }
    }
}

/// Temperature time series with a species' thermal-range overlay.
#[component]
pub fn SpeciesTab() -> Element {
    let state = use_context::<AppState>();
    let view = use_signal(|| ChartView::new(SPECIES_CANVAS_ID));
    let mut legend = use_signal(Legend::default);
    let mut surface_ready = use_signal(|| false);

    use_effect(move || {
        let ready = surface_ready();
        let timeseries = state.timeseries.read().clone();
        let selected_species = (state.selected_species)();
        let overlay = selected_species.and_then(|id| {
            state.species.read().iter().find(|s| s.id == id).map(|s| SpeciesOverlay {
                name: s.name.clone(),
                lower: s.lower_temperature,
                upper: s.upper_temperature,
            })
        });
        if !ready {
            return;
        }
        let Some(timeseries) = timeseries else {
            return;
        };
        let input = ChartInput {
            region_name: state.primary_region().map(|r| r.name).unwrap_or_default(),
            samples: series_samples(&timeseries),
            species: overlay,
            ..ChartInput::default()
        };
        render_variant(view, legend, &SpeciesChart, &input, &state);
    });

    rsx! {
        div {
            style: "display: flex; gap: 12px;",
            div {
                style: "width: 240px;",
                SpeciesSelector {}
            }
            div {
                style: "flex: 1; position: relative;",
                LegendPanel {
                    legend: legend(),
                    on_toggle: move |index| toggle_dataset(view, legend, SPECIES_CANVAS_ID, index),
                    on_toggle_panel: move |_| legend.write().toggle_panel(),
                }
                ChartPanel {
                    id: SPECIES_CANVAS_ID.to_string(),
                    loading: (state.loading)(),
                    on_ready: move |_| surface_ready.set(true),
                }
            }
        }
    }
}

/// Multi-region comparison, ordered by anomaly ascending.
#[component]
pub fn NetworkTab() -> Element {
    let state = use_context::<AppState>();
    let mut view = use_signal(|| ChartView::new(NETWORK_CANVAS_ID));
    let mut surface_ready = use_signal(|| false);

    use_effect(move || {
        let ready = surface_ready();
        let store = state.store.read();
        let selection = state.selection.read();
        let regions: Vec<&Region> = selection
            .regions()
            .iter()
            .filter_map(|&id| store.get(id))
            .collect();
        let entries = comparison_entries(regions);
        if !ready {
            return;
        }
        let ticket = view.write().begin_refresh();
        let spec = comparison_chart(&entries);
        let command = view.write().apply(ticket, spec);
        if let Some(command) = command {
            if command.destroy_previous {
                js_bridge::destroy_chart(&command.surface_id);
            }
            js_bridge::render_chart(&command.surface_id, &command.config_json);
        }
    });

    rsx! {
        div {
            style: "position: relative;",
            ChartPanel {
                id: NETWORK_CANVAS_ID.to_string(),
                loading: (state.loading)(),
                on_ready: move |_| surface_ready.set(true),
            }
        }
    }
}
