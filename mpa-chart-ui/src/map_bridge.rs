//! Map glue: region polygons out to Leaflet, click events back in.

use crate::js_bridge::call_js;
use mpa_core::region::{Region, RegionId};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Initialize the Leaflet map inside the given element.
pub fn init_map(element_id: &str) {
    call_js(&format!("window.initConditionsMap('{element_id}');"));
}

/// Add one region polygon to the map.
pub fn add_region(region: &Region) {
    let feature = serde_json::json!({
        "style": region.style,
        "properties": { "id": region.id, "name": region.name },
        "geometry": region.geometry,
    });
    let escaped = feature
        .to_string()
        .replace('\\', "\\\\")
        .replace('\'', "\\'");
    call_js(&format!("window.addRegionPolygon('{escaped}');"));
}

/// Highlight state of a polygon on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// The most recently selected region.
    Primary,
    /// Other members of a multi-selection.
    Secondary,
    /// Back to the zone's own classification style.
    None,
}

pub fn set_highlight(id: RegionId, highlight: Highlight) {
    let mode = match highlight {
        Highlight::Primary => "primary",
        Highlight::Secondary => "secondary",
        Highlight::None => "none",
    };
    call_js(&format!("window.setRegionHighlight({id}, '{mode}');"));
}

/// Replace a polygon's hover tooltip.
pub fn set_tooltip(id: RegionId, html: &str) {
    let escaped = html.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "");
    call_js(&format!("window.setRegionTooltip({id}, '{escaped}');"));
}

/// Register the handler invoked when a polygon is clicked.
///
/// The closure receives the region id and whether ctrl was held (additive
/// selection). It is leaked intentionally: the map lives for the page.
pub fn on_region_click(handler: impl FnMut(f64, bool) + 'static) {
    let closure = Closure::<dyn FnMut(f64, bool)>::new(handler);
    if let Some(window) = web_sys::window() {
        let _ = js_sys::Reflect::set(
            &window,
            &JsValue::from_str("__mpaOnRegionClick"),
            closure.as_ref().unchecked_ref(),
        );
    }
    closure.forget();
}
