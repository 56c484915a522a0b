use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while loading the price history. Any of these aborts
/// start-up.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The CSV file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required header is absent. Header names are case-sensitive.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The file is not well-formed CSV.
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A `Date` cell did not match any recognised calendar format.
    #[error("Invalid date on line {line}: {value:?}")]
    InvalidDate { line: u64, value: String },

    /// A price or volume cell could not be parsed.
    #[error("Invalid {column} value on line {line}: {value:?}")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },
}

/// Recoverable, per-interaction errors raised by the insight pipeline.
///
/// These are caught where the selected insight is dispatched and shown as a
/// notice; the rest of the UI stays interactive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    /// No records match the selected year.
    #[error("No data available for year {year}")]
    EmptyView { year: i32 },

    /// A compared column has zero variance in the view.
    #[error("Correlation undefined for year {year}: {column} has no variance")]
    DegenerateCorrelation { year: i32, column: String },
}

impl InsightError {
    /// Notice text shown in place of a chart.
    pub fn user_message(&self) -> String {
        match self {
            InsightError::EmptyView { .. } => {
                "No data available for the selected year.".to_string()
            }
            InsightError::DegenerateCorrelation { column, .. } => format!(
                "Not enough variation to correlate High, Low, and Volume ({} is constant).",
                column
            ),
        }
    }
}

/// Convenience alias for loader results.
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Convenience alias for pipeline results.
pub type InsightResult<T> = std::result::Result<T, InsightError>;
