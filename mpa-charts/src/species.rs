//! Species thermal-range overlay datasets.
//!
//! When a species is selected its tolerated temperature window is drawn over
//! the time-series chart: dashed min/max lines plus a shaded survivable
//! band between them.

use crate::dataset::{ChartPoint, Dataset, Fill, FillTarget, Paint};
use chrono::NaiveDate;

const MAX_LINE_COLOR: &str = "rgba(255, 165, 0, 1)";
const MIN_LINE_COLOR: &str = "rgba(70, 130, 180, 1)";
const SURVIVABLE_FILL: &str = "rgba(144, 238, 144, 0.3)";

/// The thermal window of a selected species.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesOverlay {
    pub name: String,
    /// Lowest tolerated temperature (degrees C).
    pub lower: f64,
    /// Highest tolerated temperature (degrees C).
    pub upper: f64,
}

/// Build the three overlay datasets across the given days, appended after
/// `base_count` existing datasets.
pub fn range_datasets(
    overlay: &SpeciesOverlay,
    days: &[NaiveDate],
    base_count: usize,
) -> Vec<Dataset> {
    let at = |temperature: f64| -> Vec<ChartPoint> {
        days.iter()
            .map(|&day| ChartPoint::new(day, temperature))
            .collect()
    };

    let mut max_line = Dataset::line(format!("{} Max Temp", overlay.name));
    max_line.data = at(overlay.upper);
    max_line.border_color = Some(Paint::solid(MAX_LINE_COLOR));
    max_line.border_width = Some(2.0);
    max_line.border_dash = Some(vec![5, 5]);
    max_line.point_radius = 0.0;

    let mut min_line = Dataset::line(format!("{} Min Temp", overlay.name));
    min_line.data = at(overlay.lower);
    min_line.border_color = Some(Paint::solid(MIN_LINE_COLOR));
    min_line.border_width = Some(2.0);
    min_line.border_dash = Some(vec![5, 5]);
    min_line.point_radius = 0.0;

    // The band rides on the min line and fills up to the max line, which
    // lands at index `base_count` once these are appended.
    let mut band = Dataset::line(format!("{} Survivable Range", overlay.name));
    band.data = at(overlay.lower);
    band.point_radius = 0.0;
    band.fill = Some(Fill {
        target: FillTarget::Dataset(base_count),
        above: None,
        below: Some(SURVIVABLE_FILL.to_string()),
    });

    vec![max_line, min_line, band]
}
