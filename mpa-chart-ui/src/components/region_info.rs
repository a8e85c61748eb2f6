//! Info panel for the primary selected region.

use crate::state::AppState;
use dioxus::prelude::*;

/// Name, classification, area and link of the most recently selected zone.
#[component]
pub fn RegionInfo() -> Element {
    let state = use_context::<AppState>();

    let Some(region) = state.primary_region() else {
        return rsx! {
            div {
                style: "margin: 8px 0; color: #666;",
                "Select an MPA on the map to view conditions data"
            }
        };
    };
    let km2 = format!("{:.2}", region.km2);

    rsx! {
        div {
            style: "margin: 8px 0;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{region.name}"
            }
            p {
                style: "margin: 0; font-size: 12px; color: #666;",
                "{region.classification} - {km2} km²"
            }
            if !region.url.is_empty() {
                a {
                    href: "{region.url}",
                    target: "_blank",
                    style: "font-size: 12px;",
                    "More information"
                }
            }
        }
    }
}
