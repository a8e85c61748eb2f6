//! Chart construction for the MPA conditions dashboard.
//!
//! Everything here is plain data: builders turn fetched series into
//! Chart.js-shaped dataset lists, the legend groups them into sections, and
//! the lifecycle module enforces the destroy-before-create and
//! last-request-wins rules. Actual drawing happens on the other side of the
//! JS bridge; these types only decide *what* gets drawn.

pub mod anomaly;
pub mod dataset;
pub mod dial;
pub mod legend;
pub mod lifecycle;
pub mod network;
pub mod quantile;
pub mod species;
pub mod timeseries;
pub mod variant;
