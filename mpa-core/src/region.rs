//! Marine protected area (MPA) zone entities and their attached indicator data.
//!
//! Regions are created when the map layer loads and live for the lifetime of
//! the page. The latest fetched indicator payload is attached in place by
//! [`RegionStore::merge_indicators`]; nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable backend identifier of an MPA zone.
pub type RegionId = i64;

/// Leaflet-style polygon styling delivered with each zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    #[serde(rename = "fillColor")]
    pub fill_color: String,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
}

impl Default for RegionStyle {
    fn default() -> Self {
        RegionStyle {
            color: "#E06377".to_string(),
            weight: 2.0,
            opacity: 0.7,
            fill_color: "#FF7F50".to_string(),
            fill_opacity: 0.4,
        }
    }
}

/// The most recently fetched indicator values for one region on the
/// currently selected date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Observed value (e.g. bottom temperature in degrees C).
    pub value: f64,
    /// Long-term expected value for the same calendar day.
    pub climatology: f64,
    /// Standard deviation of the observed series.
    pub std_dev: f64,
    /// Upper quantile threshold ("heat wave" bound).
    pub upper_quantile: f64,
    /// Lower quantile threshold ("cold wave" bound).
    pub lower_quantile: f64,
    /// Smallest observed (value - climatology) delta in the series.
    pub min_delta: f64,
    /// Largest observed (value - climatology) delta in the series.
    pub max_delta: f64,
}

/// Where the observed value sits relative to climatology and the
/// quantile thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermalCondition {
    HeatWave,
    AboveNormal,
    Normal,
    BelowNormal,
    ColdWave,
}

impl IndicatorSnapshot {
    /// Standardized anomaly: (observed - climatology) / std_dev.
    ///
    /// A zero standard deviation yields an anomaly of zero rather than
    /// dividing by zero; it means the series never varies.
    pub fn anomaly(&self) -> f64 {
        if self.std_dev == 0.0 {
            0.0
        } else {
            (self.value - self.climatology) / self.std_dev
        }
    }

    /// Classify the observed value against the quantile thresholds.
    pub fn condition(&self) -> ThermalCondition {
        if self.value > self.upper_quantile {
            ThermalCondition::HeatWave
        } else if self.value > self.climatology {
            ThermalCondition::AboveNormal
        } else if self.value < self.lower_quantile {
            ThermalCondition::ColdWave
        } else if self.value < self.climatology {
            ThermalCondition::BelowNormal
        } else {
            ThermalCondition::Normal
        }
    }
}

/// An MPA zone as shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    /// Link to the zone's information page, if any.
    pub url: String,
    /// Classification name used by the map legend.
    pub classification: String,
    pub km2: f64,
    /// Depth levels (metres) for which the backend holds series data.
    pub depths: Vec<i32>,
    pub style: RegionStyle,
    /// GeoJSON geometry, opaque to this layer; absent for metadata-only
    /// listings requested with `geometry=false`.
    pub geometry: Option<serde_json::Value>,
    /// Latest fetched indicator payload; overwritten on each successful
    /// fetch, cleared when the selection context is torn down.
    #[serde(skip)]
    pub indicator: Option<IndicatorSnapshot>,
}

impl Region {
    pub fn new(id: RegionId, name: impl Into<String>) -> Region {
        Region {
            id,
            name: name.into(),
            url: String::new(),
            classification: String::new(),
            km2: 0.0,
            depths: Vec::new(),
            style: RegionStyle::default(),
            geometry: None,
            indicator: None,
        }
    }

    /// True when `depth` is one of this region's known levels.
    pub fn has_depth(&self, depth: i32) -> bool {
        self.depths.contains(&depth)
    }
}

/// All regions currently on the map, keyed by id.
///
/// Iteration order is stable (ordered by id) so listings and comparison
/// charts are deterministic.
#[derive(Debug, Default, Clone)]
pub struct RegionStore {
    regions: BTreeMap<RegionId, Region>,
}

impl RegionStore {
    pub fn new() -> RegionStore {
        RegionStore::default()
    }

    pub fn insert(&mut self, region: Region) {
        self.regions.insert(region.id, region);
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.regions.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Merge a fetched id -> snapshot map into the stored regions.
    ///
    /// A region absent from `payloads` keeps whatever it had: a missing id
    /// means "no update this round", not "no data". Ids that are not on the
    /// map are ignored.
    pub fn merge_indicators(&mut self, payloads: &BTreeMap<RegionId, IndicatorSnapshot>) {
        for (id, snapshot) in payloads {
            if let Some(region) = self.regions.get_mut(id) {
                region.indicator = Some(*snapshot);
            }
        }
    }

    /// Drop every attached payload (selection context changed).
    pub fn clear_indicators(&mut self) {
        for region in self.regions.values_mut() {
            region.indicator = None;
        }
    }
}
