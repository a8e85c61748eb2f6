//! Wire formats for the backend API responses.
//!
//! The backend serializes most numeric values through string formatting, so
//! every numeric field here accepts either a JSON number or a numeric
//! string. Dates arrive as `"YYYY-MM-DD"` or `"YYYY-MM-DD HH:MM"`; only the
//! day part is meaningful to this layer.

use chrono::NaiveDate;
use mpa_core::region::{IndicatorSnapshot, Region, RegionId, RegionStyle};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Deserialize an f64 from either a JSON number or a numeric string.
fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// As [`flexible_f64`], but tolerating null/absent values.
fn flexible_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }
    match Option::<Raw>::deserialize(deserializer)? {
        None | Some(Raw::Null) => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed.parse().map(Some).map_err(serde::de::Error::custom)
            }
        }
    }
}

/// Take the day part of a `"YYYY-MM-DD"` or `"YYYY-MM-DD HH:MM"` string.
pub fn parse_response_day(raw: &str) -> Option<NaiveDate> {
    let day_part = raw.get(..10)?;
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

/// Paginated list envelope shared by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub page_size: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Feature-level properties of one MPA zone.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionProperties {
    pub id: RegionId,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "class")]
    pub classification: String,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub km2: Option<f64>,
    #[serde(default)]
    pub depths: Vec<i32>,
}

/// One GeoJSON-feature-shaped zone from the region list endpoint.
///
/// `geometry` is absent when the listing was requested with
/// `geometry=false`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionFeature {
    #[serde(default)]
    pub style: Option<RegionStyle>,
    pub properties: RegionProperties,
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
}

impl From<RegionFeature> for Region {
    fn from(feature: RegionFeature) -> Region {
        Region {
            id: feature.properties.id,
            name: feature.properties.name,
            url: feature.properties.url,
            classification: feature.properties.classification,
            km2: feature.properties.km2.unwrap_or(0.0),
            depths: feature.properties.depths,
            style: feature.style.unwrap_or_default(),
            geometry: feature.geometry,
            indicator: None,
        }
    }
}

/// `data` block of one region's indicator payload.
///
/// The backend emits the reference value as `climatology`, `clim`, or both
/// on the same object, so each spelling is decoded separately.
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorData {
    #[serde(deserialize_with = "flexible_f64")]
    pub ts_data: f64,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    clim: Option<f64>,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    climatology: Option<f64>,
    #[serde(deserialize_with = "flexible_f64")]
    pub std_dev: f64,
}

impl IndicatorData {
    /// The reference value under either spelling; 0.0 when the backend sent
    /// neither.
    pub fn climatology(&self) -> f64 {
        self.climatology.or(self.clim).unwrap_or(0.0)
    }
}

/// `quantile` block of one region's indicator payload.
#[derive(Debug, Clone, Deserialize)]
pub struct QuantileBounds {
    #[serde(deserialize_with = "flexible_f64")]
    pub upperq: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub lowerq: f64,
}

/// One region's entry in the batched network-indicator response.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionIndicator {
    #[serde(default)]
    pub name: Option<String>,
    pub data: IndicatorData,
    pub quantile: QuantileBounds,
    #[serde(deserialize_with = "flexible_f64")]
    pub min_delta: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub max_delta: f64,
}

impl RegionIndicator {
    pub fn to_snapshot(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            value: self.data.ts_data,
            climatology: self.data.climatology(),
            std_dev: self.data.std_dev,
            upper_quantile: self.quantile.upperq,
            lower_quantile: self.quantile.lowerq,
            min_delta: self.min_delta,
            max_delta: self.max_delta,
        }
    }
}

/// The batched indicator response: an object keyed by region id.
pub type IndicatorMap = BTreeMap<String, RegionIndicator>;

/// Convert a raw indicator map into id-keyed snapshots, dropping entries
/// whose key is not a region id.
pub fn indicator_snapshots(map: &IndicatorMap) -> BTreeMap<RegionId, IndicatorSnapshot> {
    map.iter()
        .filter_map(|(key, indicator)| {
            let id: RegionId = key.parse().ok()?;
            Some((id, indicator.to_snapshot()))
        })
        .collect()
}

/// One sample of the observed/climatology time series.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeseriesPoint {
    pub date: String,
    #[serde(deserialize_with = "flexible_f64")]
    pub ts_data: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub clim: f64,
    /// In-situ observation backing this model point, when one exists.
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub observation: Option<f64>,
}

impl TimeseriesPoint {
    pub fn day(&self) -> Option<NaiveDate> {
        parse_response_day(&self.date)
    }
}

/// Response of the time-series endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeseriesResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data: Vec<TimeseriesPoint>,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub min_delta: Option<f64>,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub max_delta: Option<f64>,
}

/// One sample of the quantile-threshold series.
#[derive(Debug, Clone, Deserialize)]
pub struct QuantilePoint {
    pub date: String,
    #[serde(deserialize_with = "flexible_f64")]
    pub upperq: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub lowerq: f64,
}

impl QuantilePoint {
    pub fn day(&self) -> Option<NaiveDate> {
        parse_response_day(&self.date)
    }
}

/// Response of the quantile endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuantileResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data: Vec<QuantilePoint>,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub min_delta: Option<f64>,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub max_delta: Option<f64>,
}

/// Response of the standard-anomalies endpoint: parallel date/value arrays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnomalyResponse {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl AnomalyResponse {
    /// Pair up the parallel arrays, dropping undecodable dates. A length
    /// mismatch truncates to the shorter side.
    pub fn samples(&self) -> Vec<(NaiveDate, f64)> {
        self.dates
            .iter()
            .zip(&self.values)
            .filter_map(|(date, &value)| Some((parse_response_day(date)?, value)))
            .collect()
    }
}

/// A species record with its thermal tolerance range.
#[derive(Debug, Clone, Deserialize)]
pub struct Species {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(deserialize_with = "flexible_f64")]
    pub lower_temperature: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub upper_temperature: f64,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub lower_depth: Option<f64>,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub upper_depth: Option<f64>,
}

/// Latest date with data, used to initialize the dashboard's date controls.
#[derive(Debug, Clone, Deserialize)]
pub struct MaxDateResponse {
    pub max_date: String,
}

impl MaxDateResponse {
    pub fn day(&self) -> Option<NaiveDate> {
        parse_response_day(&self.max_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_feature_decodes_with_and_without_geometry() {
        let raw = r##"{
            "type": "Feature",
            "style": {"color": "#123456", "weight": 2, "opacity": 0.7,
                      "fillColor": "#abcdef", "fillOpacity": 0.5},
            "properties": {"id": 42, "name": "Gully", "url": "https://example.org",
                           "class": "Oceanus", "km2": "2363.57", "depths": [5, 10, 25]}
        }"##;
        let feature: RegionFeature = serde_json::from_str(raw).unwrap();
        assert!(feature.geometry.is_none());
        let region: Region = feature.into();
        assert_eq!(region.id, 42);
        assert_eq!(region.km2, 2363.57);
        assert_eq!(region.depths, vec![5, 10, 25]);

        let with_geometry = r#"{
            "properties": {"id": 7, "name": "Basin"},
            "geometry": {"type": "Polygon", "coordinates": []}
        }"#;
        let feature: RegionFeature = serde_json::from_str(with_geometry).unwrap();
        assert!(feature.geometry.is_some());
    }

    #[test]
    fn paginated_envelope_decodes() {
        let raw = r#"{
            "count": 11, "page_size": 5,
            "next": "https://example.org/api/v1/mpas-with-timeseries/?page=2",
            "previous": null,
            "results": [{"properties": {"id": 1, "name": "A"}}]
        }"#;
        let page: Paginated<RegionFeature> = serde_json::from_str(raw).unwrap();
        assert_eq!(page.count, 11);
        assert_eq!(page.results.len(), 1);
        assert!(page.next.is_some());
    }

    #[test]
    fn indicator_map_decodes_mixed_number_encodings() {
        let raw = r#"{
            "42": {
                "name": "Total Average Bottom",
                "data": {"ts_data": "6.125", "clim": 5.0, "std_dev": "0.5"},
                "quantile": {"upperq": 8.0, "lowerq": "2.0"},
                "min_delta": -3.0,
                "max_delta": "3.0"
            }
        }"#;
        let map: IndicatorMap = serde_json::from_str(raw).unwrap();
        let snapshots = indicator_snapshots(&map);
        let snap = snapshots.get(&42).unwrap();
        assert_eq!(snap.value, 6.125);
        assert_eq!(snap.climatology, 5.0);
        assert_eq!(snap.lower_quantile, 2.0);
        assert_eq!(snap.max_delta, 3.0);
    }

    #[test]
    fn indicator_map_accepts_climatology_key() {
        let raw = r#"{
            "7": {
                "data": {"ts_data": 1.0, "climatology": 2.0, "std_dev": 1.0},
                "quantile": {"upperq": 3.0, "lowerq": 0.0},
                "min_delta": 0, "max_delta": 0
            }
        }"#;
        let map: IndicatorMap = serde_json::from_str(raw).unwrap();
        assert_eq!(indicator_snapshots(&map).get(&7).unwrap().climatology, 2.0);
    }

    #[test]
    fn indicator_map_accepts_both_climatology_spellings_at_once() {
        let raw = r#"{
            "7": {
                "data": {"ts_data": 1.0, "clim": "2.5", "climatology": 2.5, "std_dev": 1.0},
                "quantile": {"upperq": 3.0, "lowerq": 0.0},
                "min_delta": 0, "max_delta": 0
            }
        }"#;
        let map: IndicatorMap = serde_json::from_str(raw).unwrap();
        assert_eq!(indicator_snapshots(&map).get(&7).unwrap().climatology, 2.5);
    }

    #[test]
    fn non_numeric_indicator_keys_are_dropped() {
        let raw = r#"{
            "not-an-id": {
                "data": {"ts_data": 1.0, "clim": 2.0, "std_dev": 1.0},
                "quantile": {"upperq": 3.0, "lowerq": 0.0},
                "min_delta": 0, "max_delta": 0
            }
        }"#;
        let map: IndicatorMap = serde_json::from_str(raw).unwrap();
        assert!(indicator_snapshots(&map).is_empty());
    }

    #[test]
    fn timeseries_response_decodes_with_optional_observation() {
        let raw = r#"{
            "name": "Gully",
            "data": [
                {"date": "2024-06-15 00:01", "ts_data": "6.1", "clim": "5.0"},
                {"date": "2024-06-16 00:01", "ts_data": 6.2, "clim": 5.1, "observation": "6.0"}
            ],
            "max_delta": 3.0,
            "min_delta": "-3.0"
        }"#;
        let response: TimeseriesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].observation, None);
        assert_eq!(response.data[1].observation, Some(6.0));
        assert_eq!(
            response.data[0].day(),
            Some(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        );
        assert_eq!(response.min_delta, Some(-3.0));
    }

    #[test]
    fn missing_fields_decode_to_no_data() {
        let response: TimeseriesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_empty());
        assert_eq!(response.max_delta, None);
    }

    #[test]
    fn anomaly_samples_pair_dates_and_values() {
        let raw = r#"{"dates": ["2022-01-01", "junk", "2023-01-01"], "values": [0.5, 1.0, -0.2]}"#;
        let response: AnomalyResponse = serde_json::from_str(raw).unwrap();
        let samples = response.samples();
        assert_eq!(samples.len(), 2, "undecodable dates are dropped");
        assert_eq!(samples[0].1, 0.5);
        assert_eq!(samples[1].1, -0.2);
    }

    #[test]
    fn malformed_day_strings_yield_none() {
        assert_eq!(parse_response_day("junk"), None);
        assert_eq!(parse_response_day("2024-02-30 00:01"), None);
        assert!(parse_response_day("2024-06-15").is_some());
    }
}
