//! Calendar-day parsing and the date range used by time-series queries.
//!
//! All user-facing date input arrives as `YYYY-MM-DD` strings from date
//! pickers. Parsing is strict: anything that is not a real calendar day
//! (e.g. "2024-02-30") yields `None`, and callers treat that as a no-op
//! rather than an error.

use chrono::{Datelike, NaiveDate};

/// Date format used for backend query parameters: "YYYY-MM-DD"
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string into a calendar day.
///
/// Returns `None` for empty input, malformed strings and dates that do not
/// exist on the calendar.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, DAY_FORMAT).ok()
}

/// Format a calendar day as `YYYY-MM-DD` for query parameters.
pub fn format_day(date: &NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// An inclusive start/end window bounding time-series queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Build a span, rejecting inverted windows.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<DateSpan> {
        if start <= end {
            Some(DateSpan { start, end })
        } else {
            None
        }
    }

    /// Parse a span from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> anyhow::Result<DateSpan> {
        let start = parse_day(start).ok_or_else(|| anyhow::anyhow!("bad start date: {start}"))?;
        let end = parse_day(end).ok_or_else(|| anyhow::anyhow!("bad end date: {end}"))?;
        DateSpan::new(start, end).ok_or_else(|| anyhow::anyhow!("start date is after end date"))
    }

    /// True if the given day falls inside the span (inclusive).
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Shift both ends of the span by a number of years.
    ///
    /// Used by the dashboard's << / >> pan buttons. Feb 29 clamps to Feb 28
    /// when the target year is not a leap year.
    pub fn panned(&self, years: i32) -> DateSpan {
        DateSpan {
            start: shift_years(self.start, years),
            end: shift_years(self.end, years),
        }
    }
}

fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_day() {
        let day = parse_day("2024-06-15").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn rejects_nonexistent_calendar_day() {
        assert!(parse_day("2024-02-30").is_none());
        assert!(parse_day("2023-02-29").is_none());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_day("").is_none());
        assert!(parse_day("2024/06/15").is_none());
        assert!(parse_day("not a date").is_none());
    }

    #[test]
    fn round_trips_formatting() {
        let day = NaiveDate::from_ymd_opt(2021, 1, 9).unwrap();
        assert_eq!(parse_day(&format_day(&day)), Some(day));
    }

    #[test]
    fn span_rejects_inverted_window() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(DateSpan::new(start, end).is_none());
        assert!(DateSpan::parse("2024-01-02", "2024-01-01").is_err());
    }

    #[test]
    fn span_contains_is_inclusive() {
        let span = DateSpan::parse("2020-01-01", "2020-12-31").unwrap();
        assert!(span.contains(span.start));
        assert!(span.contains(span.end));
        assert!(!span.contains(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()));
    }

    #[test]
    fn pan_shifts_both_ends() {
        let span = DateSpan::parse("2019-01-01", "2024-01-01").unwrap();
        let panned = span.panned(-5);
        assert_eq!(panned, DateSpan::parse("2014-01-01", "2019-01-01").unwrap());
    }

    #[test]
    fn pan_clamps_leap_day() {
        let span = DateSpan::parse("2024-02-29", "2024-03-01").unwrap();
        let panned = span.panned(1);
        assert_eq!(panned.start, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }
}
