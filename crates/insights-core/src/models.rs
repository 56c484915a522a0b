use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of rows returned by [`Insight::TopNByClose`].
pub const TOP_N: usize = 5;

/// Column labels of the correlation matrix, in row/column order.
pub const CORRELATION_COLUMNS: [&str; 3] = ["High", "Low", "Volume"];

// ── DailyRecord ───────────────────────────────────────────────────────────────

/// One trading day read from the price history CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    /// Trading date. Unique per record; input order is not guaranteed to be
    /// ascending.
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Shares traded on the day.
    pub volume: u64,
    /// Calendar year of `date`, derived once at construction.
    #[serde(skip)]
    year: i32,
}

impl DailyRecord {
    /// Build a record and derive its calendar year.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            year: date.year(),
        }
    }

    /// Calendar year of the trading date.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// `high - low`, computed on demand and never stored.
    pub fn price_range(&self) -> f64 {
        self.high - self.low
    }
}

// ── Shaped outputs ────────────────────────────────────────────────────────────

/// A `(date, value)` pair used by the line-chart insights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// A `(date, volume)` pair used by the volume bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedVolume {
    pub date: NaiveDate,
    pub volume: u64,
}

/// Symmetric 3×3 Pearson correlation matrix over
/// [`CORRELATION_COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub values: [[f64; 3]; 3],
}

impl CorrelationMatrix {
    /// Coefficient between column `row` and column `col`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// `true` when `values[i][j] == values[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..3).all(|i| (0..3).all(|j| self.values[i][j] == self.values[j][i]))
    }
}

/// The exact structure one insight hands to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum InsightOutput {
    PriceRange(Vec<DatedValue>),
    Trend(Vec<DatedValue>),
    Volume(Vec<DatedVolume>),
    TopN(Vec<DailyRecord>),
    Correlation(CorrelationMatrix),
}

impl InsightOutput {
    /// Number of rows (or matrix cells) carried by this output.
    pub fn len(&self) -> usize {
        match self {
            InsightOutput::PriceRange(rows) | InsightOutput::Trend(rows) => rows.len(),
            InsightOutput::Volume(rows) => rows.len(),
            InsightOutput::TopN(rows) => rows.len(),
            InsightOutput::Correlation(_) => 9,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Insight ───────────────────────────────────────────────────────────────────

/// The five analysis modes offered by the insight selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Insight {
    DailyPriceRange,
    PerformanceTrend,
    VolumeOverTime,
    TopNByClose,
    Correlation,
}

impl Insight {
    /// Selector order.
    pub const ALL: [Insight; 5] = [
        Insight::DailyPriceRange,
        Insight::PerformanceTrend,
        Insight::VolumeOverTime,
        Insight::TopNByClose,
        Insight::Correlation,
    ];

    /// Command-line keys accepted by `--insight`, in selector order.
    pub const KEYS: [&'static str; 5] = ["price-range", "trend", "volume", "top-n", "correlation"];

    /// Resolve a `--insight` key. Returns `None` for unknown keys.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::KEYS
            .iter()
            .position(|k| *k == key)
            .map(|i| Self::ALL[i])
    }

    /// Command-line key for this insight.
    pub fn key(self) -> &'static str {
        Self::KEYS[self.index()]
    }

    /// Position in [`Insight::ALL`].
    pub fn index(self) -> usize {
        match self {
            Insight::DailyPriceRange => 0,
            Insight::PerformanceTrend => 1,
            Insight::VolumeOverTime => 2,
            Insight::TopNByClose => 3,
            Insight::Correlation => 4,
        }
    }

    /// Next insight in selector order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous insight in selector order, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Label shown in the selector list.
    pub fn label(self) -> &'static str {
        match self {
            Insight::DailyPriceRange => "Daily Price Range",
            Insight::PerformanceTrend => "Stock Performance Trend",
            Insight::VolumeOverTime => "Volume Over Time",
            Insight::TopNByClose => "Top N Days by Closing Price",
            Insight::Correlation => "Correlation Between High, Low, and Volume",
        }
    }

    /// Chart title for the selected `year`.
    pub fn title(self, year: i32) -> String {
        match self {
            Insight::DailyPriceRange => "Daily Price Range (High - Low)".to_string(),
            Insight::PerformanceTrend => "Stock Performance Trend (Closing Price)".to_string(),
            Insight::VolumeOverTime => "Trading Volume Over Time".to_string(),
            Insight::TopNByClose => format!("Top {} Days by Closing Price in {}", TOP_N, year),
            Insight::Correlation => "Correlation Between High, Low, and Volume".to_string(),
        }
    }

    /// Y-axis / value column label.
    pub fn value_label(self) -> &'static str {
        match self {
            Insight::DailyPriceRange => "Price Range",
            Insight::PerformanceTrend | Insight::TopNByClose => "Closing Price",
            Insight::VolumeOverTime => "Volume",
            Insight::Correlation => "Coefficient",
        }
    }

    /// Interpretation shown underneath the chart.
    pub fn conclusion(self) -> &'static str {
        match self {
            Insight::DailyPriceRange => {
                "Days with higher price ranges indicate higher volatility, which could signify \
                 trading opportunities or market uncertainty. This information is valuable for \
                 day traders who rely on volatility to make quick profits. However, prolonged \
                 high volatility may also suggest market instability, warranting caution."
            }
            Insight::PerformanceTrend => {
                "The trend of closing prices provides insights into the overall market sentiment \
                 and stock performance during the selected year. A consistent uptrend could \
                 signal investor confidence, while frequent fluctuations may indicate uncertain \
                 market conditions."
            }
            Insight::VolumeOverTime => {
                "Spikes in trading volume often coincide with significant market events, such as \
                 announcements or news related to the stock. High volume suggests increased \
                 investor interest, which can lead to either rapid price appreciation or \
                 depreciation depending on the sentiment."
            }
            Insight::TopNByClose => {
                "The top-performing days indicate peak market performance, which may be linked \
                 to positive news or market sentiment. Such days highlight periods of high \
                 investor confidence and can serve as reference points for future technical \
                 analysis or trend identification."
            }
            Insight::Correlation => {
                "Strong correlations indicate the interdependence between price and volume \
                 metrics, helping investors understand market behavior. For example, a high \
                 correlation between volume and price changes could suggest that significant \
                 trading activity influences market movements."
            }
        }
    }
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
