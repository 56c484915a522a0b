//! The insight pipeline.
//!
//! One pure shaping function per [`Insight`]. Each takes the full record
//! slice plus the selected year, filters to that year, and returns exactly
//! what the matching view draws. An empty year fails with
//! [`InsightError::EmptyView`] before anything is computed.

use insights_core::error::{InsightError, InsightResult};
use insights_core::models::{
    CorrelationMatrix, DailyRecord, DatedValue, DatedVolume, Insight, InsightOutput,
    CORRELATION_COLUMNS, TOP_N,
};
use tracing::debug;

use crate::filter::{filter_by_year, YearView};
use crate::stats;

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Run the shaping function for `insight`.
pub fn run_insight(
    insight: Insight,
    records: &[DailyRecord],
    year: i32,
) -> InsightResult<InsightOutput> {
    let started = std::time::Instant::now();

    let output = match insight {
        Insight::DailyPriceRange => daily_price_range(records, year).map(InsightOutput::PriceRange),
        Insight::PerformanceTrend => performance_trend(records, year).map(InsightOutput::Trend),
        Insight::VolumeOverTime => volume_over_time(records, year).map(InsightOutput::Volume),
        Insight::TopNByClose => top_n_by_close(records, year).map(InsightOutput::TopN),
        Insight::Correlation => correlation(records, year).map(InsightOutput::Correlation),
    };

    match &output {
        Ok(out) => debug!(
            "{} for {}: {} rows in {} µs",
            insight,
            year,
            out.len(),
            started.elapsed().as_micros()
        ),
        Err(e) => debug!("{} for {}: {}", insight, year, e),
    }
    output
}

// ── Shaping functions ─────────────────────────────────────────────────────────

/// `(date, high - low)` for each record of `year`, in input order.
pub fn daily_price_range(records: &[DailyRecord], year: i32) -> InsightResult<Vec<DatedValue>> {
    let view = non_empty_view(records, year)?;
    Ok(view
        .iter()
        .map(|r| DatedValue {
            date: r.date,
            value: r.price_range(),
        })
        .collect())
}

/// `(date, close)` for each record of `year`, in input order.
pub fn performance_trend(records: &[DailyRecord], year: i32) -> InsightResult<Vec<DatedValue>> {
    let view = non_empty_view(records, year)?;
    Ok(view
        .iter()
        .map(|r| DatedValue {
            date: r.date,
            value: r.close,
        })
        .collect())
}

/// `(date, volume)` for each record of `year`, in input order.
pub fn volume_over_time(records: &[DailyRecord], year: i32) -> InsightResult<Vec<DatedVolume>> {
    let view = non_empty_view(records, year)?;
    Ok(view
        .iter()
        .map(|r| DatedVolume {
            date: r.date,
            volume: r.volume,
        })
        .collect())
}

/// The [`TOP_N`] records of `year` with the highest close.
pub fn top_n_by_close(records: &[DailyRecord], year: i32) -> InsightResult<Vec<DailyRecord>> {
    top_n_by_close_with(records, year, TOP_N)
}

/// The `n` records of `year` with the highest close, descending.
///
/// The sort is stable, so equal closes keep their input order. Fewer than
/// `n` matching records returns all of them.
pub fn top_n_by_close_with(
    records: &[DailyRecord],
    year: i32,
    n: usize,
) -> InsightResult<Vec<DailyRecord>> {
    let view = non_empty_view(records, year)?;
    let mut ranked: Vec<&DailyRecord> = view.records().to_vec();
    ranked.sort_by(|a, b| b.close.total_cmp(&a.close));
    Ok(ranked.into_iter().take(n).cloned().collect())
}

/// Pearson correlation between High, Low and Volume for `year`.
pub fn correlation(records: &[DailyRecord], year: i32) -> InsightResult<CorrelationMatrix> {
    let view = non_empty_view(records, year)?;

    let high: Vec<f64> = view.iter().map(|r| r.high).collect();
    let low: Vec<f64> = view.iter().map(|r| r.low).collect();
    let volume: Vec<f64> = view.iter().map(|r| r.volume as f64).collect();

    stats::correlation_matrix([&high, &low, &volume]).map_err(|idx| {
        InsightError::DegenerateCorrelation {
            year,
            column: CORRELATION_COLUMNS[idx].to_string(),
        }
    })
}

fn non_empty_view(records: &[DailyRecord], year: i32) -> InsightResult<YearView<'_>> {
    filter_by_year(records, year).require_data()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
