//! Base datasets of the temperature time-series charts.
//!
//! Every time-series chart starts from the same four datasets: the observed
//! series, the climatology reference, and two fill bands drawn *between*
//! those two series: warm coloring where the observed line sits above
//! climatology, cool coloring where it sits below. Variants append their own
//! datasets after these, so the indices of the primary (0) and reference (1)
//! series are stable.

use crate::dataset::{ChartPoint, Dataset, Fill, FillTarget, Paint};
use chrono::NaiveDate;

/// When fewer observation-backed points than this are in view, observations
/// are drawn with emphasized markers so isolated samples stay visible.
pub const SPARSE_OBSERVATION_CUTOFF: usize = 12;

const PRIMARY_COLOR: &str = "#FF0000";
const REFERENCE_COLOR: &str = "#000000";
const ABOVE_BAND_COLOR: &str = "rgba(255, 0, 0, 0.2)";
const BELOW_BAND_COLOR: &str = "rgba(0, 0, 255, 0.2)";
const OBSERVATION_COLOR: &str = "#0074D9";

/// Index of the primary (observed) dataset.
pub const PRIMARY_INDEX: usize = 0;
/// Index of the climatology reference dataset.
pub const REFERENCE_INDEX: usize = 1;
/// Number of datasets produced by [`base_datasets`].
pub const BASE_DATASET_COUNT: usize = 4;

/// One fetched sample: observed value, expected value, optional in-situ
/// observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSample {
    pub day: NaiveDate,
    pub value: f64,
    pub climatology: f64,
    pub observation: Option<f64>,
}

/// The sorted day labels of a sample run, for the date-indicator crosshair.
pub fn day_labels(samples: &[SeriesSample]) -> Vec<NaiveDate> {
    samples.iter().map(|sample| sample.day).collect()
}

/// Build the observed line, the climatology line and the two bands between
/// them.
pub fn base_datasets(samples: &[SeriesSample]) -> Vec<Dataset> {
    let observed: Vec<ChartPoint> = samples
        .iter()
        .map(|sample| ChartPoint::new(sample.day, sample.value))
        .collect();
    let climatology: Vec<ChartPoint> = samples
        .iter()
        .map(|sample| ChartPoint::new(sample.day, sample.climatology))
        .collect();

    let mut primary = Dataset::line("Temperature");
    primary.data = observed.clone();
    primary.border_color = Some(Paint::solid(PRIMARY_COLOR));

    let mut reference = Dataset::line("Climatology");
    reference.data = climatology;
    reference.border_color = Some(Paint::solid(REFERENCE_COLOR));

    // The bands reuse the observed points and fill toward the climatology
    // dataset, so each band only paints on its own side of the reference.
    let mut above = Dataset::line("Above Average (Warmer)");
    above.data = observed.clone();
    above.point_radius = 0.0;
    above.fill = Some(Fill {
        target: FillTarget::Dataset(REFERENCE_INDEX),
        above: Some(ABOVE_BAND_COLOR.to_string()),
        below: None,
    });

    let mut below = Dataset::line("Below Average (Cooler)");
    below.data = observed;
    below.point_radius = 0.0;
    below.fill = Some(Fill {
        target: FillTarget::Dataset(REFERENCE_INDEX),
        above: None,
        below: Some(BELOW_BAND_COLOR.to_string()),
    });

    vec![primary, reference, above, below]
}

/// Build the in-situ observation scatter, if any sample carries one.
///
/// With fewer than `sparse_cutoff` observation-backed points in view the
/// markers switch to the emphasized sparse styling.
pub fn observation_dataset(samples: &[SeriesSample], sparse_cutoff: usize) -> Option<Dataset> {
    let points: Vec<ChartPoint> = samples
        .iter()
        .filter_map(|sample| {
            sample
                .observation
                .map(|value| ChartPoint::new(sample.day, value))
        })
        .collect();
    if points.is_empty() {
        return None;
    }

    let sparse = points.len() < sparse_cutoff;
    let mut observations = Dataset::line("Observations");
    observations.data = points;
    observations.border_color = Some(Paint::solid(OBSERVATION_COLOR));
    observations.background_color = Some(Paint::solid(OBSERVATION_COLOR));
    observations.border_width = Some(0.0);
    observations.point_radius = if sparse { 4.0 } else { 1.5 };
    observations.point_style = sparse.then(|| "triangle".to_string());
    Some(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(d: u32, value: f64, climatology: f64) -> SeriesSample {
        SeriesSample {
            day: NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
            value,
            climatology,
            observation: None,
        }
    }

    #[test]
    fn base_datasets_form_bands_between_the_two_series() {
        let samples = vec![sample(1, 6.0, 5.0), sample(2, 4.0, 5.0)];
        let datasets = base_datasets(&samples);
        assert_eq!(datasets.len(), BASE_DATASET_COUNT);

        assert_eq!(datasets[PRIMARY_INDEX].label, "Temperature");
        assert_eq!(datasets[REFERENCE_INDEX].label, "Climatology");

        // Both bands target the climatology dataset, not the origin.
        for band in &datasets[2..4] {
            let fill = band.fill.as_ref().unwrap();
            assert_eq!(fill.target, FillTarget::Dataset(REFERENCE_INDEX));
            assert_eq!(band.data, datasets[PRIMARY_INDEX].data);
        }
        assert!(datasets[2].fill.as_ref().unwrap().above.is_some());
        assert!(datasets[2].fill.as_ref().unwrap().below.is_none());
        assert!(datasets[3].fill.as_ref().unwrap().below.is_some());
    }

    #[test]
    fn no_observations_means_no_observation_dataset() {
        let samples = vec![sample(1, 6.0, 5.0)];
        assert!(observation_dataset(&samples, SPARSE_OBSERVATION_CUTOFF).is_none());
    }

    #[test]
    fn sparse_observations_get_emphasized_markers() {
        let mut samples: Vec<SeriesSample> = (1..=20).map(|d| sample(d, 6.0, 5.0)).collect();
        samples[3].observation = Some(5.9);
        samples[11].observation = Some(6.2);

        let dataset = observation_dataset(&samples, SPARSE_OBSERVATION_CUTOFF).unwrap();
        assert_eq!(dataset.data.len(), 2);
        assert_eq!(dataset.point_radius, 4.0);
        assert_eq!(dataset.point_style.as_deref(), Some("triangle"));
    }

    #[test]
    fn dense_observations_use_plain_markers() {
        let samples: Vec<SeriesSample> = (1..=20)
            .map(|d| SeriesSample {
                observation: Some(5.5),
                ..sample(d, 6.0, 5.0)
            })
            .collect();
        let dataset = observation_dataset(&samples, SPARSE_OBSERVATION_CUTOFF).unwrap();
        assert_eq!(dataset.point_radius, 1.5);
        assert!(dataset.point_style.is_none());
    }

    #[test]
    fn day_labels_follow_the_samples() {
        let samples = vec![sample(1, 6.0, 5.0), sample(2, 4.0, 5.0)];
        let labels = day_labels(&samples);
        assert_eq!(labels.len(), 2);
        assert!(labels[0] < labels[1]);
    }
}
