//! Species selector panel for the thermal-range overlay.

use crate::state::AppState;
use dioxus::prelude::*;

/// Dropdown of species with thermal-range data, plus the selected species'
/// tolerance details.
#[component]
pub fn SpeciesSelector() -> Element {
    let mut state = use_context::<AppState>();
    let species = state.species.read().clone();
    let selected_id = (state.selected_species)();
    let selected = selected_id.and_then(|id| species.iter().find(|s| s.id == id).cloned());

    let on_change = move |evt: Event<FormData>| {
        state.selected_species.set(evt.value().parse::<i64>().ok());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "species-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Species: "
            }
            select {
                id: "species-select",
                onchange: on_change,
                option { value: "", selected: selected_id.is_none(), "Select a Species" }
                for s in species.iter() {
                    option {
                        value: "{s.id}",
                        selected: Some(s.id) == selected_id,
                        "{s.name}"
                    }
                }
            }
            if let Some(s) = selected {
                div {
                    style: "margin-top: 8px; font-size: 12px; color: #444;",
                    if let Some(scientific) = s.scientific_name.as_ref() {
                        p { style: "margin: 0; font-style: italic; color: #888;", "{scientific}" }
                    }
                    p {
                        style: "margin: 4px 0 0 0;",
                        "Temperature Range: {s.lower_temperature}°C - {s.upper_temperature}°C"
                    }
                    if let (Some(lower), Some(upper)) = (s.lower_depth, s.upper_depth) {
                        p { style: "margin: 2px 0 0 0;", "Depth Range: {lower}m - {upper}m" }
                    }
                }
            }
        }
    }
}
