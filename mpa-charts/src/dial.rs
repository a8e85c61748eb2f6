//! Risk dial shown next to the quantile chart.
//!
//! The dial sweeps between the series' min/max delta and points at the
//! current anomaly delta; its color flips when the observed value crosses a
//! quantile threshold.

use mpa_core::region::IndicatorSnapshot;
use serde::Serialize;

const NORMAL_COLOR: &str = "rgb(55, 255, 55)";
const HEAT_COLOR: &str = "rgb(255, 55, 55)";
const COLD_COLOR: &str = "rgb(55, 55, 255)";

/// Configuration for one dial widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DialSpec {
    pub min: f64,
    pub max: f64,
    /// Needle position: observed minus climatology.
    pub value: f64,
    #[serde(skip)]
    observed: f64,
    #[serde(skip)]
    upper: f64,
    #[serde(skip)]
    lower: f64,
}

impl DialSpec {
    pub fn from_snapshot(snapshot: &IndicatorSnapshot) -> DialSpec {
        DialSpec {
            min: round2(snapshot.min_delta),
            max: round2(snapshot.max_delta),
            value: round2(snapshot.value - snapshot.climatology),
            observed: snapshot.value,
            upper: snapshot.upper_quantile,
            lower: snapshot.lower_quantile,
        }
    }

    /// Needle color: red past the upper threshold, blue past the lower one,
    /// green in between.
    pub fn color(&self) -> &'static str {
        if self.observed > self.upper {
            HEAT_COLOR
        } else if self.observed < self.lower {
            COLD_COLOR
        } else {
            NORMAL_COLOR
        }
    }

    /// JSON handed to the page's dial global.
    pub fn to_config_json(&self) -> String {
        serde_json::json!({
            "min": self.min,
            "max": self.max,
            "value": self.value,
            "fgColor": self.color(),
        })
        .to_string()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
