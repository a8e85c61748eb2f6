//! Query-parameter construction for the backend endpoints.
//!
//! Kept separate from the HTTP client so the exact wire parameters are unit
//! testable. All dates go out as ISO `YYYY-MM-DD`; an unset depth is sent as
//! an empty `depth=` parameter, which the backend reads as the whole-column
//! aggregate series.

use chrono::NaiveDate;
use mpa_core::dates::{format_day, DateSpan};
use mpa_core::region::RegionId;
use mpa_core::selection::QuantileBand;

/// Page size used when walking the region list.
pub const REGION_PAGE_SIZE: u64 = 5;

/// Integer discriminator selecting which series a data endpoint returns.
///
/// The dashboard only exposes bottom temperature; the other kinds exist in
/// the backend's catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesKind {
    #[default]
    BottomTemperature,
    SurfaceTemperature,
    Salinity,
}

impl SeriesKind {
    pub fn discriminator(self) -> i32 {
        match self {
            SeriesKind::BottomTemperature => 1,
            SeriesKind::SurfaceTemperature => 2,
            SeriesKind::Salinity => 3,
        }
    }
}

pub type Params = Vec<(String, String)>;

fn push(params: &mut Params, key: &str, value: impl ToString) {
    params.push((key.to_string(), value.to_string()));
}

fn push_depth(params: &mut Params, depth: Option<i32>) {
    match depth {
        Some(depth) => push(params, "depth", depth),
        None => push(params, "depth", ""),
    }
}

fn push_span(params: &mut Params, span: &DateSpan) {
    push(params, "start_date", format_day(&span.start));
    push(params, "end_date", format_day(&span.end));
}

/// Parameters for one page of the region listing.
///
/// `geometry=false` requests the lightweight metadata-only representation;
/// `filter` restricts the listing to specific zones via repeated `mpa_id`.
pub fn region_page(
    page: u64,
    page_size: u64,
    with_geometry: bool,
    filter: &[RegionId],
) -> Params {
    let mut params = Params::new();
    push(&mut params, "geometry", with_geometry);
    push(&mut params, "page_size", page_size);
    push(&mut params, "page", page);
    for id in filter {
        push(&mut params, "mpa_id", id);
    }
    params
}

/// Parameters for the batched network-indicator fetch: one comma-joined
/// `id` parameter for the whole batch plus the selected date.
pub fn network_indicators(joined_ids: &str, date: NaiveDate) -> Params {
    let mut params = Params::new();
    push(&mut params, "id", joined_ids);
    push(&mut params, "date", format_day(&date));
    params
}

/// Parameters for the observed/climatology time-series fetch.
pub fn timeseries(
    mpa: RegionId,
    depth: Option<i32>,
    span: &DateSpan,
    kind: SeriesKind,
) -> Params {
    let mut params = Params::new();
    push(&mut params, "mpa", mpa);
    push_depth(&mut params, depth);
    push_span(&mut params, span);
    push(&mut params, "type", kind.discriminator());
    params
}

/// Parameters for the quantile-threshold fetch.
pub fn quantiles(
    mpa: RegionId,
    depth: Option<i32>,
    span: &DateSpan,
    band: QuantileBand,
) -> Params {
    let mut params = Params::new();
    push(&mut params, "mpa", mpa);
    push_depth(&mut params, depth);
    push_span(&mut params, span);
    push(&mut params, "upper_quantile", band.upper);
    push(&mut params, "lower_quantile", band.lower);
    params
}

/// Parameters for the standard-anomalies fetch.
pub fn anomalies(mpa: RegionId, depth: Option<i32>, span: &DateSpan) -> Params {
    let mut params = Params::new();
    push(&mut params, "mpa", mpa);
    push_depth(&mut params, depth);
    push_span(&mut params, span);
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> DateSpan {
        DateSpan::parse("2019-01-01", "2024-01-01").unwrap()
    }

    fn get<'a>(params: &'a Params, key: &str) -> Vec<&'a str> {
        params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn batched_indicator_ids_ride_in_one_parameter() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let params = network_indicators("42,43", date);
        assert_eq!(get(&params, "id"), vec!["42,43"]);
        assert_eq!(get(&params, "date"), vec!["2024-06-15"]);
    }

    #[test]
    fn empty_depth_means_aggregate_series() {
        let params = timeseries(42, None, &span(), SeriesKind::default());
        assert_eq!(get(&params, "depth"), vec![""]);
        assert_eq!(get(&params, "type"), vec!["1"]);
    }

    #[test]
    fn numeric_depth_is_passed_through() {
        let params = timeseries(42, Some(25), &span(), SeriesKind::Salinity);
        assert_eq!(get(&params, "depth"), vec!["25"]);
        assert_eq!(get(&params, "type"), vec!["3"]);
        assert_eq!(get(&params, "start_date"), vec!["2019-01-01"]);
        assert_eq!(get(&params, "end_date"), vec!["2024-01-01"]);
    }

    #[test]
    fn quantile_band_is_sent_as_floats() {
        let band = QuantileBand::new(0.1, 0.9).unwrap();
        let params = quantiles(42, None, &span(), band);
        assert_eq!(get(&params, "upper_quantile"), vec!["0.9"]);
        assert_eq!(get(&params, "lower_quantile"), vec!["0.1"]);
    }

    #[test]
    fn region_page_repeats_filter_ids() {
        let params = region_page(2, REGION_PAGE_SIZE, false, &[42, 43]);
        assert_eq!(get(&params, "geometry"), vec!["false"]);
        assert_eq!(get(&params, "page"), vec!["2"]);
        assert_eq!(get(&params, "page_size"), vec!["5"]);
        assert_eq!(get(&params, "mpa_id"), vec!["42", "43"]);
    }
}
