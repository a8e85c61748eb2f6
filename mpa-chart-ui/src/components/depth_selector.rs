//! Depth level selector for the primary region.

use crate::state::AppState;
use dioxus::prelude::*;

/// Dropdown of the primary region's known depth levels. The empty option is
/// the whole-column aggregate series.
#[component]
pub fn DepthSelector() -> Element {
    let mut state = use_context::<AppState>();
    let depths = state
        .primary_region()
        .map(|region| region.depths)
        .unwrap_or_default();
    let selected = state.selection.read().depth();

    let on_change = move |evt: Event<FormData>| {
        state.set_depth(&evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "depth-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Bottom Depth: "
            }
            select {
                id: "depth-select",
                onchange: on_change,
                option {
                    value: "",
                    selected: selected.is_none(),
                    "Total Average Bottom Timeseries"
                }
                for depth in depths.iter() {
                    option {
                        value: "{depth}",
                        selected: Some(*depth) == selected,
                        "{depth} m"
                    }
                }
            }
        }
    }
}
