//! Multi-region comparison chart for the network tab.
//!
//! When several regions are selected, their standardized anomalies are
//! compared side by side as bars, ordered ascending so the coolest zone is
//! always leftmost.

use crate::dataset::{ChartKind, ChartPoint, ChartSpec, Dataset, Paint};
use mpa_core::region::{Region, RegionId};

const COMPARISON_BAR_COLOR: &str = "rgba(0, 0, 255, 0.5)";

/// One labelled bar of the comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonEntry {
    pub region: RegionId,
    pub name: String,
    pub anomaly: f64,
}

/// Collect entries for every given region that has an indicator payload
/// attached, ordered by anomaly ascending.
pub fn comparison_entries<'a>(
    regions: impl IntoIterator<Item = &'a Region>,
) -> Vec<ComparisonEntry> {
    let mut entries: Vec<ComparisonEntry> = regions
        .into_iter()
        .filter_map(|region| {
            let snapshot = region.indicator.as_ref()?;
            Some(ComparisonEntry {
                region: region.id,
                name: region.name.clone(),
                anomaly: snapshot.anomaly(),
            })
        })
        .collect();
    entries.sort_by(|a, b| a.anomaly.total_cmp(&b.anomaly));
    entries
}

/// Build the comparison bar chart from ordered entries.
pub fn comparison_chart(entries: &[ComparisonEntry]) -> ChartSpec {
    let mut bars = Dataset::line("Standardized Anomaly");
    bars.background_color = Some(Paint::solid(COMPARISON_BAR_COLOR));
    bars.point_radius = 0.0;
    bars.tension = 0.0;
    bars.data = entries
        .iter()
        .map(|entry| ChartPoint {
            x: entry.name.clone(),
            y: entry.anomaly,
        })
        .collect();

    let mut spec = ChartSpec::new(ChartKind::Bar, "Network Condition Comparison");
    spec.x_title = "Zone".to_string();
    spec.y_title = "Standardized Anomaly".to_string();
    spec.labels = entries.iter().map(|entry| entry.name.clone()).collect();
    spec.datasets.push(bars);
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpa_core::region::IndicatorSnapshot;

    fn region(id: RegionId, name: &str, value: f64) -> Region {
        let mut region = Region::new(id, name);
        region.indicator = Some(IndicatorSnapshot {
            value,
            climatology: 5.0,
            std_dev: 1.0,
            upper_quantile: 8.0,
            lower_quantile: 2.0,
            min_delta: -3.0,
            max_delta: 3.0,
        });
        region
    }

    #[test]
    fn entries_are_ordered_by_anomaly_ascending() {
        let warm = region(42, "Gully", 7.0);
        let cool = region(43, "Basin", 4.0);
        let entries = comparison_entries([&warm, &cool]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].region, 43);
        assert_eq!(entries[1].region, 42);
        assert!(entries[0].anomaly < entries[1].anomaly);
    }

    #[test]
    fn regions_without_data_are_skipped() {
        let with_data = region(42, "Gully", 7.0);
        let without = Region::new(43, "Basin");
        let entries = comparison_entries([&with_data, &without]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].region, 42);
    }

    #[test]
    fn chart_carries_one_labelled_bar_per_entry() {
        let warm = region(42, "Gully", 7.0);
        let cool = region(43, "Basin", 4.0);
        let spec = comparison_chart(&comparison_entries([&warm, &cool]));
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.labels, vec!["Basin", "Gully"]);
        assert_eq!(spec.datasets.len(), 1);
        assert_eq!(spec.datasets[0].data.len(), 2);
    }
}
