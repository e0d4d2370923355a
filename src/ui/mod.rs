//! UI modules for the desktop dashboard

pub mod components;
mod dashboard;
mod details;
pub mod theme;

pub use dashboard::render_dashboard;
pub use details::render_details_panel;
