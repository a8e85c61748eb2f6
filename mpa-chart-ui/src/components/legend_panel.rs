//! Sectioned legend panel with per-entry toggling.

use dioxus::prelude::*;
use mpa_charts::legend::{Legend, LegendEntry};

/// Props for LegendPanel
#[derive(Props, Clone, PartialEq)]
pub struct LegendPanelProps {
    pub legend: Legend,
    /// Raised with the dataset index when an entry is clicked.
    pub on_toggle: EventHandler<usize>,
    /// Raised when the panel's collapse button is clicked.
    #[props(default)]
    pub on_toggle_panel: EventHandler<()>,
}

/// Floating legend grouped into sections; clicking an entry hides only that
/// dataset.
#[component]
pub fn LegendPanel(props: LegendPanelProps) -> Element {
    let sections = ["timeseries", "quantile", "species-range"];
    let on_toggle = props.on_toggle;
    let on_toggle_panel = props.on_toggle_panel;
    let visible = props.legend.visible;

    let section_nodes = sections.iter().map(|section| {
        let rows: Vec<LegendEntry> = props.legend.section(section).cloned().collect();
        rsx! {
            div {
                style: "display: flex; flex-direction: column; margin-bottom: 5px;",
                for entry in rows {
                    LegendRow { entry, on_toggle }
                }
            }
        }
    });

    rsx! {
        div {
            style: "position: absolute; top: 30px; right: 10px; max-width: 200px; z-index: 10; background: rgba(255, 255, 255, 0.8); border-radius: 4px; padding: 5px;",
            button {
                style: "position: absolute; top: 5px; right: 5px; width: 24px; height: 24px; cursor: pointer;",
                title: "Toggle Legend",
                onclick: move |_| on_toggle_panel.call(()),
                if visible { "x" } else { "=" }
            }
            if visible {
                {section_nodes}
            }
        }
    }
}

/// One clickable legend row.
#[component]
fn LegendRow(entry: LegendEntry, on_toggle: EventHandler<usize>) -> Element {
    let index = entry.dataset_index;
    let decoration = if entry.hidden { "line-through" } else { "none" };
    let opacity = if entry.hidden { "0.5" } else { "1.0" };

    rsx! {
        div {
            style: "display: flex; align-items: center; cursor: pointer; padding: 2px 4px; font-size: 0.85em; text-decoration: {decoration}; opacity: {opacity};",
            onclick: move |_| on_toggle.call(index),
            span {
                style: "display: inline-block; width: 12px; height: 12px; margin-right: 5px; background-color: {entry.swatch}; border: 1px solid rgba(0, 0, 0, 0.2);",
            }
            span { "{entry.label}" }
        }
    }
}
