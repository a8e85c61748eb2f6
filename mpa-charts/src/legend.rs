//! Sectioned chart legends with per-entry toggling.
//!
//! Legend entries are grouped into named sections (timeseries, quantile,
//! species-range) by match predicates over the datasets. Clicking an entry
//! hides only that dataset; the panel's own visibility is per-chart state
//! owned by the [`Legend`], not a global flag.

use crate::dataset::{Dataset, Paint};

const FALLBACK_SWATCH: &str = "rgba(128, 128, 128, 0.5)";

/// A named legend section and the predicate deciding which datasets belong
/// to it.
pub struct LegendSection {
    pub id: &'static str,
    pub matches: fn(&Dataset) -> bool,
}

/// One clickable legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub section: &'static str,
    pub dataset_index: usize,
    pub label: String,
    pub swatch: String,
    pub hidden: bool,
}

/// The legend of one chart instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    /// Whether the legend panel itself is expanded.
    pub visible: bool,
}

/// Swatch color for a dataset: the fill treatment when one exists, the
/// border otherwise.
fn swatch_color(dataset: &Dataset) -> String {
    if let Some(fill) = &dataset.fill {
        if let Some(above) = &fill.above {
            return above.clone();
        }
        if let Some(below) = &fill.below {
            return below.clone();
        }
    }
    match (&dataset.border_color, &dataset.background_color) {
        (Some(Paint::Solid(color)), _) => color.clone(),
        (_, Some(Paint::Solid(color))) => color.clone(),
        _ => FALLBACK_SWATCH.to_string(),
    }
}

impl Legend {
    /// Group datasets into the given sections. A dataset matching no
    /// section gets no legend row (the fill bands of the base chart are
    /// deliberately unlisted this way).
    pub fn build(sections: &[LegendSection], datasets: &[Dataset]) -> Legend {
        let mut entries = Vec::new();
        for section in sections {
            for (index, dataset) in datasets.iter().enumerate() {
                if (section.matches)(dataset) {
                    entries.push(LegendEntry {
                        section: section.id,
                        dataset_index: index,
                        label: dataset.label.clone(),
                        swatch: swatch_color(dataset),
                        hidden: dataset.hidden,
                    });
                }
            }
        }
        Legend {
            entries,
            visible: true,
        }
    }

    /// Hide or show a single dataset via its legend entry. Nothing else on
    /// the chart is touched.
    pub fn toggle_entry(&mut self, dataset_index: usize, datasets: &mut [Dataset]) {
        let Some(dataset) = datasets.get_mut(dataset_index) else {
            return;
        };
        dataset.hidden = !dataset.hidden;
        for entry in &mut self.entries {
            if entry.dataset_index == dataset_index {
                entry.hidden = dataset.hidden;
            }
        }
    }

    /// Collapse or expand the whole panel (per-chart state).
    pub fn toggle_panel(&mut self) {
        self.visible = !self.visible;
    }

    /// Entries of one section, for rendering grouped rows.
    pub fn section<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a LegendEntry> {
        self.entries.iter().filter(move |entry| entry.section == id)
    }
}

/// The sections used by the time-series family of charts.
pub fn standard_sections() -> Vec<LegendSection> {
    vec![
        LegendSection {
            id: "timeseries",
            matches: |dataset| {
                dataset.label == "Temperature"
                    || dataset.label == "Climatology"
                    || dataset.label == "Observations"
            },
        },
        LegendSection {
            id: "quantile",
            matches: |dataset| dataset.label.contains("Wave") || dataset.label == "Average Range",
        },
        LegendSection {
            id: "species-range",
            matches: |dataset| {
                dataset.label.contains("Max Temp")
                    || dataset.label.contains("Min Temp")
                    || dataset.label.contains("Survivable Range")
            },
        },
    ]
}
