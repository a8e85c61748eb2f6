//! Reusable Dioxus RSX components for the conditions dashboard.

mod chart_panel;
mod date_controls;
mod depth_selector;
mod error_display;
mod legend_panel;
mod loading_spinner;
mod quantile_controls;
mod region_info;
mod species_selector;

pub use chart_panel::ChartPanel;
pub use date_controls::DateControls;
pub use depth_selector::DepthSelector;
pub use error_display::ErrorDisplay;
pub use legend_panel::LegendPanel;
pub use loading_spinner::LoadingSpinner;
pub use quantile_controls::QuantileControls;
pub use region_info::RegionInfo;
pub use species_selector::SpeciesSelector;
