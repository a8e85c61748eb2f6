//! Upper/lower quantile inputs for the heat/cold-wave thresholds.

use crate::state::AppState;
use dioxus::prelude::*;

/// Number inputs for the quantile band. Out-of-range values are rejected at
/// the selection boundary and the inputs snap back to the accepted band.
#[component]
pub fn QuantileControls() -> Element {
    let mut state = use_context::<AppState>();
    let band = state.selection.read().band();

    let on_upper_change = move |evt: Event<FormData>| {
        if let Ok(upper) = evt.value().parse::<f64>() {
            let lower = state.selection.read().band().lower;
            state.set_quantile_band(lower, upper);
        }
    };

    let on_lower_change = move |evt: Event<FormData>| {
        if let Ok(lower) = evt.value().parse::<f64>() {
            let upper = state.selection.read().band().upper;
            state.set_quantile_band(lower, upper);
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Upper Quantile: "
                input {
                    r#type: "number",
                    value: "{band.upper}",
                    min: "0.5",
                    max: "1.0",
                    step: "0.1",
                    style: "width: 70px;",
                    onchange: on_upper_change,
                }
            }
            label {
                style: "font-weight: bold;",
                "Lower Quantile: "
                input {
                    r#type: "number",
                    value: "{band.lower}",
                    min: "0.0",
                    max: "0.5",
                    step: "0.1",
                    style: "width: 70px;",
                    onchange: on_lower_change,
                }
            }
        }
    }
}
