//! Terminal UI layer for Stock Insights.
//!
//! Provides themes, the header and selector components, chart, table, and
//! heatmap views, and the application event loop built on top of
//! [`ratatui`] for exploring one year of price history at a time.

pub mod app;
pub mod chart_view;
pub mod components;
pub mod heatmap_view;
pub mod table_view;
pub mod themes;

pub use insights_core as core;
