//! Date controls: start/selected/end date inputs plus year-pan buttons.

use crate::state::AppState;
use dioxus::prelude::*;
use mpa_core::dates::format_day;

/// Start date, selected date, end date and the << < > >> pan buttons.
///
/// Invalid input never reaches the fetch queues: the selection state
/// rejects it and the inputs re-render from the last accepted values.
#[component]
pub fn DateControls() -> Element {
    let mut state = use_context::<AppState>();
    let selection = state.selection.read();
    let start = selection
        .span()
        .map(|span| format_day(&span.start))
        .unwrap_or_default();
    let end = selection
        .span()
        .map(|span| format_day(&span.end))
        .unwrap_or_default();
    let selected = selection
        .selected_date()
        .map(|date| format_day(&date))
        .unwrap_or_default();
    drop(selection);

    let end_for_start = end.clone();
    let start_for_end = start.clone();

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            button {
                title: "-10 years",
                onclick: move |_| { state.pan_range(-10); },
                "<<"
            }
            button {
                title: "-5 years",
                onclick: move |_| { state.pan_range(-5); },
                "<"
            }
            label {
                style: "font-weight: bold;",
                "Start: "
                input {
                    r#type: "date",
                    value: "{start}",
                    max: "9999-12-31",
                    onchange: move |evt: Event<FormData>| {
                        state.set_date_range(&evt.value(), &end_for_start);
                    },
                }
            }
            label {
                style: "font-weight: bold;",
                "Selected: "
                input {
                    r#type: "date",
                    value: "{selected}",
                    max: "9999-12-31",
                    onchange: move |evt: Event<FormData>| {
                        state.set_selected_date(&evt.value());
                    },
                }
            }
            label {
                style: "font-weight: bold;",
                "End: "
                input {
                    r#type: "date",
                    value: "{end}",
                    max: "9999-12-31",
                    onchange: move |evt: Event<FormData>| {
                        state.set_date_range(&start_for_end, &evt.value());
                    },
                }
            }
            button {
                title: "+5 years",
                onclick: move |_| { state.pan_range(5); },
                ">"
            }
            button {
                title: "+10 years",
                onclick: move |_| { state.pan_range(10); },
                ">>"
            }
        }
    }
}
