//! Data layer for Stock Insights.
//!
//! Loads the daily price CSV into an immutable [`reader::Dataset`], filters
//! it by calendar year, and shapes each year's view into the structure one
//! insight needs for display.

pub mod filter;
pub mod pipeline;
pub mod reader;
pub mod stats;

pub use insights_core as core;
pub use reader::Dataset;
