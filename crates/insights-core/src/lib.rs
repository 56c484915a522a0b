//! Shared domain types for Stock Insights.
//!
//! Daily price records, the closed set of insights and their shaped outputs,
//! the load/insight error taxonomy, command-line settings, and display
//! formatting helpers.

pub mod dates;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{InsightError, LoadError};
pub use models::{DailyRecord, Insight, InsightOutput};
