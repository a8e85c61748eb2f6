//! Heat/cold-wave threshold datasets for the quantile chart.
//!
//! The thresholds are whole series, not constants: the backend computes the
//! upper and lower quantile for each calendar day over the active range.
//! These datasets are rebuilt whenever the quantile band or the date range
//! changes.

use crate::dataset::{ChartPoint, Dataset, Fill, FillTarget, Paint};
use chrono::NaiveDate;
use mpa_core::selection::QuantileBand;

const THRESHOLD_BORDER_COLOR: &str = "#CCCCCC";
const HEAT_WAVE_FILL: &str = "rgba(128, 0, 0, 0.8)";
const COLD_WAVE_FILL: &str = "rgba(0, 0, 128, 0.8)";
const AVERAGE_RANGE_FILL: &str = "rgba(128, 128, 128, 0.2)";

/// One fetched quantile sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileSample {
    pub day: NaiveDate,
    pub upper: f64,
    pub lower: f64,
}

/// Build the three threshold datasets, appended after `base_count` existing
/// datasets.
///
/// The heat-wave dataset paints the primary series where it rises above the
/// upper threshold, the cold-wave dataset where it falls below the lower
/// one, and the average-range band shades the corridor between the two
/// thresholds.
pub fn threshold_datasets(
    samples: &[QuantileSample],
    band: QuantileBand,
    base_count: usize,
) -> Vec<Dataset> {
    let upper_points: Vec<ChartPoint> = samples
        .iter()
        .map(|sample| ChartPoint::new(sample.day, sample.upper))
        .collect();
    let lower_points: Vec<ChartPoint> = samples
        .iter()
        .map(|sample| ChartPoint::new(sample.day, sample.lower))
        .collect();

    let mut heat = Dataset::line(format!("Marine Heat Wave above ({})", band.upper));
    heat.data = upper_points;
    heat.border_color = Some(Paint::solid(THRESHOLD_BORDER_COLOR));
    heat.border_width = Some(1.5);
    heat.fill = Some(Fill {
        target: FillTarget::Dataset(0),
        above: None,
        below: Some(HEAT_WAVE_FILL.to_string()),
    });

    let mut cold = Dataset::line(format!("Marine Cold Wave below ({})", band.lower));
    cold.data = lower_points.clone();
    cold.border_color = Some(Paint::solid(THRESHOLD_BORDER_COLOR));
    cold.border_width = Some(1.5);
    cold.fill = Some(Fill {
        target: FillTarget::Dataset(0),
        above: Some(COLD_WAVE_FILL.to_string()),
        below: None,
    });

    // The range band rides on the lower threshold and fills up to the upper
    // threshold dataset, which sits at `base_count` once appended.
    let mut range = Dataset::line("Average Range");
    range.data = lower_points;
    range.border_width = Some(0.0);
    range.fill = Some(Fill {
        target: FillTarget::Dataset(base_count),
        above: None,
        below: Some(AVERAGE_RANGE_FILL.to_string()),
    });

    vec![heat, cold, range]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeseries::BASE_DATASET_COUNT;

    fn sample(d: u32) -> QuantileSample {
        QuantileSample {
            day: NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
            upper: 8.0,
            lower: 2.0,
        }
    }

    #[test]
    fn labels_carry_the_active_band() {
        let band = QuantileBand::new(0.1, 0.9).unwrap();
        let datasets = threshold_datasets(&[sample(1)], band, BASE_DATASET_COUNT);
        assert_eq!(datasets[0].label, "Marine Heat Wave above (0.9)");
        assert_eq!(datasets[1].label, "Marine Cold Wave below (0.1)");
    }

    #[test]
    fn range_band_targets_the_upper_threshold_dataset() {
        let band = QuantileBand::default();
        let datasets = threshold_datasets(&[sample(1), sample(2)], band, BASE_DATASET_COUNT);
        let range = &datasets[2];
        assert_eq!(
            range.fill.as_ref().unwrap().target,
            FillTarget::Dataset(BASE_DATASET_COUNT)
        );
        // It rides on the lower threshold's points.
        assert_eq!(range.data, datasets[1].data);
    }

    #[test]
    fn a_new_band_produces_new_threshold_labels() {
        let samples = vec![sample(1)];
        let before = threshold_datasets(&samples, QuantileBand::default(), BASE_DATASET_COUNT);
        let after = threshold_datasets(
            &samples,
            QuantileBand::new(0.05, 0.95).unwrap(),
            BASE_DATASET_COUNT,
        );
        assert_ne!(before[0].label, after[0].label);
    }
}
