//! MPA Ocean-Conditions Dashboard
//!
//! Map-driven dashboard for marine-protected-area climate conditions:
//! Leaflet polygons for the zones, Chart.js charts for the data, both owned
//! by the host page and driven through the JS bridge.
//!
//! Data flow:
//! 1. On mount: walk the paginated region listing and add each polygon to
//!    the map; load the species catalogue; seed the date controls from the
//!    newest available date.
//! 2. Polygon clicks and date/depth/range changes mutate the selection,
//!    which enqueues affected regions on the debounced fetch queues.
//! 3. A queue driver sleeps until each queue's deadline and issues one
//!    batched indicator request per flush; results merge into the region
//!    store and refresh tooltips, dial and charts.

use dioxus::prelude::*;
use log::warn;
use mpa_api::client::ApiClient;
use mpa_chart_ui::components::{DateControls, DepthSelector, ErrorDisplay, LoadingSpinner, RegionInfo};
use mpa_chart_ui::state::{AppState, Tab};
use mpa_chart_ui::{js_bridge, map_bridge};
use mpa_core::dates::{format_day, DateSpan};
use mpa_core::region::{Region, RegionId};

mod driver;
mod tabs;

use tabs::{AnomalyTab, NetworkTab, SpeciesTab, TimeseriesTab};

const MAP_ELEMENT_ID: &str = "conditions-map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("conditions-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // One-time setup: evaluate the JS bridges and register the polygon
    // click handler before any polygon exists.
    use_hook(move || {
        js_bridge::init_bridge();
        map_bridge::on_region_click(move |id, ctrl_held| {
            let mut state = state;
            state.click_region(id as RegionId, ctrl_held);
        });
    });

    // ─── Initial load: map polygons, species, default date window ───
    use_future(move || async move {
        map_bridge::init_map(MAP_ELEMENT_ID);
        let client = ApiClient::new(driver::base_url());

        match client.list_regions(true, &[]).await {
            Ok(features) => {
                for feature in features {
                    let region: Region = feature.into();
                    map_bridge::add_region(&region);
                    state.store.write().insert(region);
                }
            }
            Err(err) => {
                warn!("failed to load map data: {err}");
                state.error_msg.set(Some(
                    "Failed to load map data. Please try refreshing the page.".to_string(),
                ));
            }
        }
        state.map_loading.set(false);

        match client.species().await {
            Ok(list) => state.species.set(list),
            Err(err) => warn!("failed to load species list: {err}"),
        }

        // Seed the controls: a five-year window ending at the newest data,
        // with the newest day selected.
        if let Ok(Some(max_date)) = client.max_date().await {
            let window = DateSpan {
                start: max_date,
                end: max_date,
            }
            .panned(-5);
            state.set_date_range(&format_day(&window.start), &format_day(&max_date));
            state.set_selected_date(&format_day(&max_date));
        }
    });

    // ─── Map highlights follow the selection ───
    use_effect(move || {
        let selection = state.selection.read();
        let store = state.store.read();
        let primary = selection.primary();
        for id in store.ids() {
            let highlight = if Some(id) == primary {
                map_bridge::Highlight::Primary
            } else if selection.is_selected(id) {
                map_bridge::Highlight::Secondary
            } else {
                map_bridge::Highlight::None
            };
            map_bridge::set_highlight(id, highlight);
        }
    });

    // ─── Queue drivers: re-armed on every enqueue ───
    use_effect(move || driver::arm_queue_driver(state, state.range_queue));
    use_effect(move || driver::arm_queue_driver(state, state.refresh_queue));

    // ─── Primary-region series fetch, collapsed to the latest context ───
    let fetch_sequence = use_signal(|| 0u64);
    let fetch_context = use_memo(move || {
        let selection = state.selection.read();
        (
            selection.primary(),
            selection.span(),
            selection.depth(),
            selection.band(),
        )
    });
    use_effect(move || {
        let (primary, span, depth, band) = fetch_context();
        let (Some(primary), Some(span)) = (primary, span) else {
            return;
        };
        driver::fetch_primary_series(state, fetch_sequence, primary, span, depth, band);
    });

    // ─── Render ───
    let active_tab = (state.active_tab)();
    let tab_content = match active_tab {
        Tab::Timeseries => rsx! { TimeseriesTab {} },
        Tab::StandardAnomalies => rsx! { AnomalyTab {} },
        Tab::Species => rsx! { SpeciesTab {} },
        Tab::Network => rsx! { NetworkTab {} },
    };

    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.map_loading.read() {
                LoadingSpinner {}
            }

            div {
                id: MAP_ELEMENT_ID,
                style: "height: 420px; width: 100%; margin-bottom: 8px;",
            }

            RegionInfo {}
            DateControls {}
            DepthSelector {}

            TabBar { active: active_tab }

            {tab_content}
        }
    }
}

/// Props for TabBar
#[derive(Props, Clone, PartialEq)]
struct TabBarProps {
    active: Tab,
}

/// Buttons switching between the data tabs.
#[component]
fn TabBar(props: TabBarProps) -> Element {
    let mut state = use_context::<AppState>();
    let tabs = [
        (Tab::Timeseries, "Timeseries"),
        (Tab::StandardAnomalies, "Standard Anomalies"),
        (Tab::Species, "Species Data"),
        (Tab::Network, "Network Data"),
    ];

    let buttons = tabs.into_iter().map(|(tab, label)| {
        let style = if tab == props.active {
            "padding: 6px 12px; border: none; border-bottom: 2px solid #2196F3; background: none; font-weight: bold; cursor: pointer;"
        } else {
            "padding: 6px 12px; border: none; background: none; color: #666; cursor: pointer;"
        };
        rsx! {
            button {
                style: "{style}",
                onclick: move |_| state.active_tab.set(tab),
                "{label}"
            }
        }
    });

    rsx! {
        div {
            style: "display: flex; gap: 4px; margin: 12px 0 8px 0; border-bottom: 1px solid #e0e0e0;",
            {buttons}
        }
    }
}
