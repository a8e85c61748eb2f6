//! Shared Dioxus components and JS bridge for the MPA conditions dashboard.
//!
//! This crate provides:
//! - `js_bridge` / `map_bridge`: Rust wrappers for the page-level Chart.js
//!   and Leaflet globals via `js_sys::eval()`
//! - `state`: reactive AppState with Dioxus Signals plus the selection and
//!   fetch-queue wiring
//! - `tooltip`: HTML for the per-region map tooltips
//! - `components`: reusable RSX components (controls, selectors, panels)

pub mod components;
pub mod js_bridge;
pub mod map_bridge;
pub mod state;
pub mod tooltip;
