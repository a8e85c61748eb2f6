//! Chart canvas container with loading overlay and readiness signalling.

use dioxus::prelude::*;

/// Props for ChartPanel
#[derive(Props, Clone, PartialEq)]
pub struct ChartPanelProps {
    /// DOM id of the canvas (the chart bridge renders into this)
    pub id: String,
    /// Whether the chart's data is still loading
    #[props(default = false)]
    pub loading: bool,
    /// Minimum height in pixels
    #[props(default = 425)]
    pub min_height: u32,
    /// Raised once the canvas is attached to the DOM. Rendering must wait
    /// for this signal; there is no polling for the element.
    #[props(default)]
    pub on_ready: EventHandler<()>,
}

/// A container for one chart surface.
#[component]
pub fn ChartPanel(props: ChartPanelProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            if props.loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Loading chart..."
                }
            }
            canvas {
                id: "{props.id}",
                style: "width: 100%;",
                onmounted: move |_| props.on_ready.call(()),
            }
        }
    }
}
