//! Selection state: which regions, date, depth and date range the dashboard
//! is currently showing.
//!
//! This is the single source of truth for "what should be displayed".
//! Mutators never perform network I/O; when a change means fresh data is
//! needed they report the affected region ids to a [`DataSink`] (in the app,
//! the fetch batcher). Invalid input (malformed dates, unknown depths,
//! inverted ranges, out-of-range quantiles) is rejected as a no-op: the
//! previous state stands and the sink is not notified.

use crate::dates::{parse_day, DateSpan};
use crate::region::{Region, RegionId};
use chrono::NaiveDate;
use log::debug;

/// Default upper quantile threshold (marine heat wave bound).
pub const DEFAULT_UPPER_QUANTILE: f64 = 0.9;
/// Default lower quantile threshold (marine cold wave bound).
pub const DEFAULT_LOWER_QUANTILE: f64 = 0.1;

/// Receiver for "region X needs fresh data" signals raised by mutations.
pub trait DataSink {
    fn need_data(&mut self, region: RegionId);
}

/// Upper/lower quantile pair bounding the heat/cold-wave thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantileBand {
    pub lower: f64,
    pub upper: f64,
}

impl QuantileBand {
    /// Build a band, rejecting values outside [0, 1] or a lower bound that
    /// is not below the upper bound.
    pub fn new(lower: f64, upper: f64) -> Option<QuantileBand> {
        let in_range = (0.0..=1.0).contains(&lower) && (0.0..=1.0).contains(&upper);
        if in_range && lower < upper {
            Some(QuantileBand { lower, upper })
        } else {
            None
        }
    }
}

impl Default for QuantileBand {
    fn default() -> Self {
        QuantileBand {
            lower: DEFAULT_LOWER_QUANTILE,
            upper: DEFAULT_UPPER_QUANTILE,
        }
    }
}

/// The selected regions plus the date/depth/range context shared by every
/// data fetch.
///
/// The region list is ordered by selection time; the last entry is the
/// primary selection shown in the info panel and single-region charts.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    regions: Vec<RegionId>,
    selected_date: Option<NaiveDate>,
    depth: Option<i32>,
    span: Option<DateSpan>,
    band: QuantileBand,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    /// Ordered selected region ids; the last one is primary.
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// The most recently selected region, if any.
    pub fn primary(&self) -> Option<RegionId> {
        self.regions.last().copied()
    }

    pub fn is_selected(&self, id: RegionId) -> bool {
        self.regions.contains(&id)
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Selected depth level in metres; `None` means the whole-column
    /// aggregate series.
    pub fn depth(&self) -> Option<i32> {
        self.depth
    }

    pub fn span(&self) -> Option<DateSpan> {
        self.span
    }

    pub fn band(&self) -> QuantileBand {
        self.band
    }

    /// Select a region.
    ///
    /// With `additive` false (a plain click) the prior multi-selection is
    /// cleared and the region becomes the only selected one. With `additive`
    /// true (ctrl held) the region's membership is toggled without touching
    /// the rest of the list. Newly selected regions are reported to the sink;
    /// deselection fetches nothing.
    pub fn select_region(&mut self, region: &Region, additive: bool, sink: &mut impl DataSink) {
        if additive {
            if let Some(pos) = self.regions.iter().position(|&id| id == region.id) {
                self.regions.remove(pos);
                debug!("deselected region {}", region.id);
                return;
            }
            self.regions.push(region.id);
        } else {
            self.regions.clear();
            self.regions.push(region.id);
        }
        sink.need_data(region.id);
    }

    /// Set the selected calendar day from a `YYYY-MM-DD` string.
    ///
    /// Returns false (and changes nothing) when the string is not a valid
    /// calendar date. On success every selected region needs fresh
    /// date-dependent data.
    pub fn set_date(&mut self, raw: &str, sink: &mut impl DataSink) -> bool {
        let Some(date) = parse_day(raw) else {
            debug!("ignoring invalid selected date {raw:?}");
            return false;
        };
        self.selected_date = Some(date);
        self.need_all(sink);
        true
    }

    /// Set the selected depth level, validated against the primary region's
    /// known levels. `None` selects the whole-column aggregate series.
    pub fn set_depth(
        &mut self,
        depth: Option<i32>,
        known_depths: &[i32],
        sink: &mut impl DataSink,
    ) -> bool {
        if let Some(d) = depth {
            if !known_depths.contains(&d) {
                debug!("ignoring unknown depth {d}");
                return false;
            }
        }
        self.depth = depth;
        self.need_all(sink);
        true
    }

    /// Set the start/end window for time-series queries from two
    /// `YYYY-MM-DD` strings. Rejects malformed dates and inverted windows.
    pub fn set_date_range(&mut self, start: &str, end: &str, sink: &mut impl DataSink) -> bool {
        let (Some(start), Some(end)) = (parse_day(start), parse_day(end)) else {
            return false;
        };
        let Some(span) = DateSpan::new(start, end) else {
            return false;
        };
        self.span = Some(span);
        self.need_all(sink);
        true
    }

    /// Shift the date range by whole years (the << / >> pan buttons).
    pub fn pan_range(&mut self, years: i32, sink: &mut impl DataSink) -> bool {
        let Some(span) = self.span else {
            return false;
        };
        self.span = Some(span.panned(years));
        self.need_all(sink);
        true
    }

    /// Set the quantile thresholds used for heat/cold-wave bounds.
    pub fn set_quantile_band(&mut self, lower: f64, upper: f64, sink: &mut impl DataSink) -> bool {
        let Some(band) = QuantileBand::new(lower, upper) else {
            debug!("ignoring out-of-range quantile band {lower}..{upper}");
            return false;
        };
        self.band = band;
        self.need_all(sink);
        true
    }

    fn need_all(&self, sink: &mut impl DataSink) {
        for &id in &self.regions {
            sink.need_data(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    #[derive(Default)]
    struct Recorder(Vec<RegionId>);

    impl DataSink for Recorder {
        fn need_data(&mut self, region: RegionId) {
            self.0.push(region);
        }
    }

    #[test]
    fn plain_click_replaces_selection() {
        let mut selection = Selection::new();
        let mut sink = Recorder::default();
        selection.select_region(&Region::new(42, "Gully"), false, &mut sink);
        selection.select_region(&Region::new(43, "Basin"), false, &mut sink);
        assert_eq!(selection.regions(), &[43]);
        assert_eq!(selection.primary(), Some(43));
        assert_eq!(sink.0, vec![42, 43]);
    }

    #[test]
    fn additive_click_toggles_membership() {
        let mut selection = Selection::new();
        let mut sink = Recorder::default();
        let gully = Region::new(42, "Gully");
        let basin = Region::new(43, "Basin");

        selection.select_region(&gully, false, &mut sink);
        selection.select_region(&basin, true, &mut sink);
        assert_eq!(selection.regions(), &[42, 43]);

        // Ctrl-clicking an already-selected region removes only it and
        // triggers no fetch.
        selection.select_region(&gully, true, &mut sink);
        assert_eq!(selection.regions(), &[43]);
        assert_eq!(sink.0, vec![42, 43]);
    }

    #[test]
    fn invalid_date_is_a_no_op() {
        let mut selection = Selection::new();
        let mut sink = Recorder::default();
        selection.select_region(&Region::new(42, "Gully"), false, &mut sink);
        assert!(selection.set_date("2024-06-15", &mut sink));
        let before = selection.selected_date();

        assert!(!selection.set_date("2024-02-30", &mut sink));
        assert_eq!(selection.selected_date(), before, "previous date must stand");
        // Only the select and the one valid date change reached the sink.
        assert_eq!(sink.0, vec![42, 42]);
    }

    #[test]
    fn date_change_requests_data_for_every_selected_region() {
        let mut selection = Selection::new();
        let mut sink = Recorder::default();
        selection.select_region(&Region::new(42, "Gully"), false, &mut sink);
        selection.select_region(&Region::new(43, "Basin"), true, &mut sink);
        sink.0.clear();
        assert!(selection.set_date("2024-06-15", &mut sink));
        assert_eq!(sink.0, vec![42, 43]);
    }

    #[test]
    fn depth_must_be_a_known_level() {
        let mut selection = Selection::new();
        let mut sink = Recorder::default();
        assert!(!selection.set_depth(Some(25), &[5, 10], &mut sink));
        assert_eq!(selection.depth(), None);
        assert!(selection.set_depth(Some(10), &[5, 10], &mut sink));
        assert_eq!(selection.depth(), Some(10));
        // None always means the aggregate series.
        assert!(selection.set_depth(None, &[], &mut sink));
    }

    #[test]
    fn range_rejects_inversion_and_bad_dates() {
        let mut selection = Selection::new();
        let mut sink = Recorder::default();
        assert!(!selection.set_date_range("2024-01-02", "2024-01-01", &mut sink));
        assert!(!selection.set_date_range("junk", "2024-01-01", &mut sink));
        assert!(selection.span().is_none());
        assert!(selection.set_date_range("2019-01-01", "2024-01-01", &mut sink));
        assert!(selection.span().is_some());
    }

    #[test]
    fn quantile_band_is_validated() {
        let mut selection = Selection::new();
        let mut sink = Recorder::default();
        assert!(!selection.set_quantile_band(0.9, 0.1, &mut sink));
        assert!(!selection.set_quantile_band(-0.1, 0.9, &mut sink));
        assert!(!selection.set_quantile_band(0.1, 1.5, &mut sink));
        assert_eq!(selection.band(), QuantileBand::default());
        assert!(selection.set_quantile_band(0.05, 0.95, &mut sink));
    }

    #[test]
    fn pan_requires_an_existing_range() {
        let mut selection = Selection::new();
        let mut sink = Recorder::default();
        assert!(!selection.pan_range(5, &mut sink));
        selection.set_date_range("2019-01-01", "2024-01-01", &mut sink);
        assert!(selection.pan_range(5, &mut sink));
        let span = selection.span().unwrap();
        assert_eq!(crate::dates::format_day(&span.start), "2024-01-01");
        assert_eq!(crate::dates::format_day(&span.end), "2029-01-01");
    }
}
