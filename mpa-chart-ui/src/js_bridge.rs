//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Chart.js and Leaflet are loaded by the host page ahead of the wasm
//! bundle; the glue in `assets/js/*.js` is embedded at compile time and
//! evaluated once at startup, promoting its functions to `window.*`. Calls
//! into those globals are only made once the owning component has signalled
//! that its render surface is mounted, so there is no DOM polling here.

static CHART_BRIDGE_JS: &str = include_str!("../assets/js/chart-bridge.js");
static MAP_BRIDGE_JS: &str = include_str!("../assets/js/map-bridge.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('MPA JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Evaluate the bridge scripts. Call once at app startup, before any
/// component signals surface readiness.
pub fn init_bridge() {
    let all_js = [CHART_BRIDGE_JS, MAP_BRIDGE_JS].join("\n");
    let _ = js_sys::eval(&all_js);
}

fn escape(payload: &str) -> String {
    payload.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "")
}

/// Create (replacing any previous instance) the chart bound to a canvas.
pub fn render_chart(canvas_id: &str, config_json: &str) {
    let escaped = escape(config_json);
    call_js(&format!(
        "window.renderConditionChart('{canvas_id}', '{escaped}');"
    ));
}

/// Tear down the chart bound to a canvas, if any.
pub fn destroy_chart(canvas_id: &str) {
    call_js(&format!("window.destroyConditionChart('{canvas_id}');"));
}

/// Hide or show one dataset of a rendered chart without rebuilding it.
pub fn set_dataset_hidden(canvas_id: &str, dataset_index: usize, hidden: bool) {
    call_js(&format!(
        "window.setConditionDatasetHidden('{canvas_id}', {dataset_index}, {hidden});"
    ));
}

/// Configure the risk dial widget.
pub fn render_dial(dial_id: &str, config_json: &str) {
    let escaped = escape(config_json);
    call_js(&format!("window.renderRiskDial('{dial_id}', '{escaped}');"));
}
