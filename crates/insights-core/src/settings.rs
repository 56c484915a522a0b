use clap::Parser;
use std::path::PathBuf;

use crate::models::Insight;

/// Fixed location of the price history, relative to the working directory.
pub const DATA_FILE: &str = "SBIN_New_Data.csv";

/// Lowest year offered by the year selector.
pub const MIN_YEAR: i32 = 2000;

/// Highest year offered by the year selector, also the default selection.
pub const MAX_YEAR: i32 = 2024;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive SBIN stock data insights in the terminal
#[derive(Parser, Debug, Clone)]
#[command(
    name = "stock-insights",
    about = "Interactive SBIN stock data insights in the terminal",
    version
)]
pub struct Settings {
    /// Initially selected year (2000-2024)
    #[arg(long, default_value = "2024", value_parser = clap::value_parser!(i32).range(2000..=2024))]
    pub year: i32,

    /// Initially selected insight
    #[arg(long, default_value = "price-range", value_parser = Insight::KEYS)]
    pub insight: String,

    /// Output mode: interactive dashboard, or one-shot JSON / text on stdout
    #[arg(long, default_value = "tui", value_parser = ["tui", "json", "text"])]
    pub output: String,

    /// Display theme
    #[arg(long, default_value = "dark", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(
        long,
        default_value = "WARNING",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]
    )]
    pub log_level: String,

    /// Log file path (recommended with the dashboard, which owns the terminal)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`Settings::load`] over an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The insight selected with `--insight`.
    ///
    /// clap restricts the value to [`Insight::KEYS`], so the fallback only
    /// applies to hand-built settings.
    pub fn selected_insight(&self) -> Insight {
        Insight::from_key(&self.insight).unwrap_or(Insight::DailyPriceRange)
    }

    /// Path of the price history file.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(DATA_FILE)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
