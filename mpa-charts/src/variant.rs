//! The chart-variant strategy.
//!
//! Every chart on the dashboard implements [`ChartVariant`]: one shared
//! capability contract instead of an inheritance chain. A variant decides
//! which datasets to build from the fetched input; the surrounding lifecycle
//! and legend machinery is identical for all of them.

use crate::anomaly::{anomaly_dataset, AnomalySample};
use crate::dataset::{ChartKind, ChartSpec};
use crate::legend::{standard_sections, LegendSection};
use crate::quantile::{threshold_datasets, QuantileSample};
use crate::species::{range_datasets, SpeciesOverlay};
use crate::timeseries::{
    base_datasets, day_labels, observation_dataset, SeriesSample, SPARSE_OBSERVATION_CUTOFF,
};
use mpa_core::selection::QuantileBand;

/// Everything a variant may draw from. The dashboard fills in the parts the
/// active tab fetched; variants read what they need.
#[derive(Debug, Clone)]
pub struct ChartInput {
    pub region_name: String,
    pub samples: Vec<SeriesSample>,
    pub quantiles: Vec<QuantileSample>,
    pub band: QuantileBand,
    pub species: Option<SpeciesOverlay>,
    pub anomalies: Vec<AnomalySample>,
    pub sparse_cutoff: usize,
}

impl Default for ChartInput {
    fn default() -> Self {
        ChartInput {
            region_name: String::new(),
            samples: Vec::new(),
            quantiles: Vec::new(),
            band: QuantileBand::default(),
            species: None,
            anomalies: Vec::new(),
            sparse_cutoff: SPARSE_OBSERVATION_CUTOFF,
        }
    }
}

/// Shared contract of all chart variants.
pub trait ChartVariant {
    fn title(&self, input: &ChartInput) -> String;

    fn legend_sections(&self) -> Vec<LegendSection> {
        standard_sections()
    }

    fn build(&self, input: &ChartInput) -> ChartSpec;
}

fn line_spec(title: String, input: &ChartInput) -> ChartSpec {
    let mut spec = ChartSpec::new(ChartKind::Line, title);
    spec.y_title = "Temperature (°C)".to_string();
    spec.days = day_labels(&input.samples);
    spec.datasets = base_datasets(&input.samples);
    spec
}

fn append_observations(spec: &mut ChartSpec, input: &ChartInput) {
    if let Some(observations) = observation_dataset(&input.samples, input.sparse_cutoff) {
        spec.datasets.push(observations);
    }
}

/// Observed vs. climatology with the fill bands between them.
pub struct TimeseriesChart;

impl ChartVariant for TimeseriesChart {
    fn title(&self, input: &ChartInput) -> String {
        format!("Temperature Timeseries - {}", input.region_name)
    }

    fn build(&self, input: &ChartInput) -> ChartSpec {
        let mut spec = line_spec(self.title(input), input);
        append_observations(&mut spec, input);
        spec
    }
}

/// The time-series chart plus heat/cold-wave quantile thresholds.
pub struct QuantileChart;

impl ChartVariant for QuantileChart {
    fn title(&self, input: &ChartInput) -> String {
        format!("Heat and Cold Waves - {}", input.region_name)
    }

    fn build(&self, input: &ChartInput) -> ChartSpec {
        let mut spec = line_spec(self.title(input), input);
        let base_count = spec.datasets.len();
        spec.datasets
            .extend(threshold_datasets(&input.quantiles, input.band, base_count));
        append_observations(&mut spec, input);
        spec
    }
}

/// The time-series chart plus a species' thermal-range overlay.
pub struct SpeciesChart;

impl ChartVariant for SpeciesChart {
    fn title(&self, input: &ChartInput) -> String {
        format!("Species Thermal Range - {}", input.region_name)
    }

    fn build(&self, input: &ChartInput) -> ChartSpec {
        let mut spec = line_spec(self.title(input), input);
        if let Some(overlay) = &input.species {
            let base_count = spec.datasets.len();
            let days = spec.days.clone();
            spec.datasets.extend(range_datasets(overlay, &days, base_count));
        }
        append_observations(&mut spec, input);
        spec
    }
}

/// Yearly standardized anomalies as sign-colored bars.
pub struct AnomalyChart;

impl ChartVariant for AnomalyChart {
    fn title(&self, input: &ChartInput) -> String {
        format!("Standard Anomalies - {}", input.region_name)
    }

    fn legend_sections(&self) -> Vec<LegendSection> {
        vec![LegendSection {
            id: "timeseries",
            matches: |dataset| dataset.label == "Standard Anomaly",
        }]
    }

    fn build(&self, input: &ChartInput) -> ChartSpec {
        let mut spec = ChartSpec::new(ChartKind::Bar, self.title(input));
        spec.x_title = "Year".to_string();
        spec.y_title = "Standard Anomaly".to_string();
        spec.datasets.push(anomaly_dataset(&input.anomalies));
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legend::Legend;
    use crate::timeseries::BASE_DATASET_COUNT;
    use chrono::NaiveDate;

    fn input() -> ChartInput {
        let days: Vec<NaiveDate> = (1..=20)
            .map(|d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap())
            .collect();
        ChartInput {
            region_name: "Gully".to_string(),
            samples: days
                .iter()
                .map(|&day| SeriesSample {
                    day,
                    value: 6.0,
                    climatology: 5.0,
                    observation: Some(5.8),
                })
                .collect(),
            quantiles: days
                .iter()
                .map(|&day| QuantileSample {
                    day,
                    upper: 8.0,
                    lower: 2.0,
                })
                .collect(),
            species: Some(SpeciesOverlay {
                name: "Atlantic Cod".to_string(),
                lower: 2.0,
                upper: 12.0,
            }),
            anomalies: vec![
                AnomalySample { year: 2022, value: 0.5 },
                AnomalySample { year: 2023, value: -0.2 },
            ],
            ..ChartInput::default()
        }
    }

    #[test]
    fn timeseries_variant_builds_base_plus_observations() {
        let spec = TimeseriesChart.build(&input());
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.datasets.len(), BASE_DATASET_COUNT + 1);
        assert_eq!(spec.days.len(), 20);
        assert_eq!(spec.title, "Temperature Timeseries - Gully");
    }

    #[test]
    fn quantile_variant_appends_thresholds_before_observations() {
        let spec = QuantileChart.build(&input());
        assert_eq!(spec.datasets.len(), BASE_DATASET_COUNT + 3 + 1);
        assert!(spec.datasets[BASE_DATASET_COUNT].label.contains("Heat Wave"));
        assert_eq!(spec.datasets.last().unwrap().label, "Observations");
    }

    #[test]
    fn species_variant_appends_the_overlay() {
        let spec = SpeciesChart.build(&input());
        assert!(spec
            .datasets
            .iter()
            .any(|dataset| dataset.label == "Atlantic Cod Survivable Range"));
    }

    #[test]
    fn species_variant_without_species_is_just_the_base() {
        let mut input = input();
        input.species = None;
        let spec = SpeciesChart.build(&input);
        assert_eq!(spec.datasets.len(), BASE_DATASET_COUNT + 1);
    }

    #[test]
    fn anomaly_variant_is_a_bar_chart() {
        let spec = AnomalyChart.build(&input());
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.datasets.len(), 1);
        assert_eq!(spec.datasets[0].data.len(), 2);
    }

    #[test]
    fn variant_legends_cover_their_datasets() {
        let variant = QuantileChart;
        let spec = variant.build(&input());
        let legend = Legend::build(&variant.legend_sections(), &spec.datasets);
        // Temperature, Climatology, Observations + three quantile rows.
        assert_eq!(legend.entries.len(), 6);
    }
}
