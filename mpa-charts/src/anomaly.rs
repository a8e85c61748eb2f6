//! Yearly standardized-anomaly bar datasets.
//!
//! Each bar is one year's standardized anomaly; warm years are painted red,
//! cool years blue.

use crate::dataset::{ChartPoint, Dataset, Paint};
use chrono::NaiveDate;

const ABOVE_NORMAL_COLOR: &str = "rgba(234, 67, 53, 0.7)";
const BELOW_NORMAL_COLOR: &str = "rgba(66, 133, 244, 0.7)";

/// One year's standardized anomaly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalySample {
    pub year: i32,
    pub value: f64,
}

/// Build the sign-colored anomaly bars.
pub fn anomaly_dataset(samples: &[AnomalySample]) -> Dataset {
    let points: Vec<ChartPoint> = samples
        .iter()
        .map(|sample| {
            // Bars sit on the first day of their year on the time axis.
            let day = NaiveDate::from_ymd_opt(sample.year, 1, 1)
                .unwrap_or(NaiveDate::MIN);
            ChartPoint::new(day, sample.value)
        })
        .collect();
    let colors: Vec<String> = samples
        .iter()
        .map(|sample| {
            if sample.value < 0.0 {
                BELOW_NORMAL_COLOR.to_string()
            } else {
                ABOVE_NORMAL_COLOR.to_string()
            }
        })
        .collect();

    let mut bars = Dataset::line("Standard Anomaly");
    bars.data = points;
    bars.border_color = Some(Paint::PerPoint(colors.clone()));
    bars.background_color = Some(Paint::PerPoint(colors));
    bars.point_radius = 0.0;
    bars.tension = 0.0;
    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_are_colored_by_sign() {
        let samples = vec![
            AnomalySample { year: 2021, value: 1.2 },
            AnomalySample { year: 2022, value: -0.4 },
            AnomalySample { year: 2023, value: 0.0 },
        ];
        let dataset = anomaly_dataset(&samples);
        let Some(Paint::PerPoint(colors)) = &dataset.background_color else {
            panic!("expected per-point colors");
        };
        assert_eq!(colors[0], ABOVE_NORMAL_COLOR);
        assert_eq!(colors[1], BELOW_NORMAL_COLOR);
        // Zero counts as the above-normal treatment, matching the legend's
        // "> 0" / "< 0" split.
        assert_eq!(colors[2], ABOVE_NORMAL_COLOR);
    }

    #[test]
    fn bars_sit_on_the_first_day_of_their_year() {
        let samples = vec![AnomalySample { year: 2022, value: 0.5 }];
        let dataset = anomaly_dataset(&samples);
        assert_eq!(dataset.data[0].x, "2022-01-01");
    }
}
