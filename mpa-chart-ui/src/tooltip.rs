//! Hover tooltip HTML for map polygons.
//!
//! Once a date is selected, each polygon's tooltip grows a condition bar and
//! a small table of the region's latest indicator values. Regions without a
//! fetched payload keep the plain name tooltip.

use chrono::NaiveDate;
use mpa_core::dates::format_day;
use mpa_core::region::{Region, ThermalCondition};

fn condition_class(condition: ThermalCondition) -> &'static str {
    match condition {
        ThermalCondition::HeatWave => "bg-danger",
        ThermalCondition::AboveNormal => "bg-danger-subtle",
        ThermalCondition::ColdWave => "bg-primary",
        ThermalCondition::BelowNormal => "bg-primary-subtle",
        ThermalCondition::Normal => "bg-success",
    }
}

/// Build the tooltip HTML for one region on the selected date.
pub fn region_tooltip_html(region: &Region, date: NaiveDate) -> String {
    let Some(snapshot) = &region.indicator else {
        return format!("<div>{}</div>", region.name);
    };

    let anomaly = snapshot.anomaly();
    // Bar width: where the current anomaly sits within the series' range of
    // standardized deltas.
    let max_anomaly = if snapshot.std_dev == 0.0 {
        0.0
    } else {
        (snapshot.max_delta / snapshot.std_dev).abs()
    };
    let percentage = if max_anomaly == 0.0 {
        0.0
    } else {
        (anomaly.abs() / max_anomaly).clamp(0.0, 1.0)
    };

    format!(
        concat!(
            "<div class=\"row\"><div class=\"col text-center\">{name} {date}</div></div>",
            "<div class=\"row\"><div class=\"col\">",
            "<div class=\"progress\" style=\"height: 20px;\">",
            "<div class=\"progress-bar {class}\" role=\"progressbar\" style=\"width: {width:.0}%\"></div>",
            "</div></div></div>",
            "<div class=\"row\"><div class=\"col\">",
            "<table class=\"table table-sm text-center\">",
            "<thead><tr><th>Std. Anom</th><th>&deg;C</th><th>Avg (&deg;C)</th>",
            "<th>&sigma;</th><th>90%</th><th>10%</th></tr></thead>",
            "<tbody><tr><td>{anomaly:.3}</td><td>{value:.3}</td><td>{clim:.3}</td>",
            "<td>{std_dev:.3}</td><td>{upper:.3}</td><td>{lower:.3}</td></tr></tbody>",
            "</table></div></div>",
        ),
        name = region.name,
        date = format_day(&date),
        class = condition_class(snapshot.condition()),
        width = percentage * 100.0,
        anomaly = anomaly,
        value = snapshot.value,
        clim = snapshot.climatology,
        std_dev = snapshot.std_dev,
        upper = snapshot.upper_quantile,
        lower = snapshot.lower_quantile,
    )
}
