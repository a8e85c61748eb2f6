//! Chart.js-shaped dataset and chart-spec types.
//!
//! Serialized field names follow the Chart.js configuration object, so a
//! spec can be handed to the page's chart global as one JSON string.

use chrono::NaiveDate;
use mpa_core::dates::format_day;
use mpa_core::locate::locate;
use serde::Serialize;

/// One {x, y} sample; `x` is an ISO `YYYY-MM-DD` day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: f64,
}

impl ChartPoint {
    pub fn new(day: NaiveDate, y: f64) -> ChartPoint {
        ChartPoint {
            x: format_day(&day),
            y,
        }
    }
}

/// A solid color or one color per data point (bar charts color by sign).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    PerPoint(Vec<String>),
}

impl Paint {
    pub fn solid(color: impl Into<String>) -> Paint {
        Paint::Solid(color.into())
    }
}

/// Fill reference of a band dataset: another dataset's index or the axis
/// origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillTarget {
    Dataset(usize),
    Origin,
}

impl Serialize for FillTarget {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FillTarget::Dataset(index) => serializer.serialize_u64(*index as u64),
            FillTarget::Origin => serializer.serialize_str("origin"),
        }
    }
}

/// Fill treatment between this dataset and its target: one color where this
/// dataset sits above the target, another where it sits below.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill {
    pub target: FillTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub above: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub below: Option<String>,
}

/// One dataset of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<u32>>,
    pub point_radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_style: Option<String>,
    pub tension: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    pub hidden: bool,
}

impl Dataset {
    /// A line dataset with the defaults shared by every series here.
    pub fn line(label: impl Into<String>) -> Dataset {
        Dataset {
            label: label.into(),
            data: Vec::new(),
            border_color: None,
            background_color: None,
            border_width: None,
            border_dash: None,
            point_radius: 0.1,
            point_style: None,
            tension: 0.1,
            fill: None,
            hidden: false,
        }
    }
}

/// Chart type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// Everything needed to (re)create one chart on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub datasets: Vec<Dataset>,
    /// Category labels for bar charts; empty for time-scale charts, whose
    /// points carry their own x values.
    pub labels: Vec<String>,
    /// Sorted day labels backing the date-indicator crosshair.
    pub days: Vec<NaiveDate>,
    /// Day the crosshair annotation currently points at.
    pub date_indicator: Option<NaiveDate>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> ChartSpec {
        ChartSpec {
            kind,
            title: title.into(),
            x_title: "Date".to_string(),
            y_title: String::new(),
            datasets: Vec::new(),
            labels: Vec::new(),
            days: Vec::new(),
            date_indicator: None,
        }
    }

    /// Move the crosshair to the labelled day nearest `target`, returning
    /// the located index. With no day labels there is nothing to indicate.
    pub fn indicate_date(&mut self, target: NaiveDate) -> Option<usize> {
        let index = locate(&self.days, &target)?;
        self.date_indicator = Some(self.days[index]);
        Some(index)
    }

    /// Serialize to the configuration object consumed by the page's chart
    /// global.
    pub fn to_config_json(&self) -> String {
        let mut data = serde_json::json!({ "datasets": self.datasets });
        if !self.labels.is_empty() {
            data["labels"] = serde_json::json!(self.labels);
        }
        let config = serde_json::json!({
            "type": self.kind,
            "data": data,
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "title": { "display": true, "text": self.title },
                    "tooltip": { "mode": "index", "intersect": false },
                    "annotation": {
                        "annotations": {
                            "dateIndicator": self.date_indicator.map(|day| serde_json::json!({
                                "type": "line",
                                "scaleID": "x",
                                "value": format_day(&day),
                                "borderColor": "black",
                            })),
                        }
                    },
                },
                "scales": {
                    "x": { "title": { "display": true, "text": self.x_title } },
                    "y": { "title": { "display": true, "text": self.y_title } },
                },
            },
        });
        config.to_string()
    }
}
