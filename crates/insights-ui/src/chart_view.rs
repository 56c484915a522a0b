//! Time-series charts: price range, closing trend, and volume.
//!
//! The x axis is the trading-day index within the year, so weekends and
//! holidays leave no gaps. Axis labels show the first, middle, and last
//! dates of the series.

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset as Series, GraphType},
    Frame,
};

use insights_core::formatting::{format_date, format_price, format_volume};
use insights_core::models::{DatedValue, DatedVolume};

use crate::themes::Theme;

/// Line chart of one value per trading day.
pub fn render_line_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value_label: &str,
    rows: &[DatedValue],
    theme: &Theme,
) {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.value))
        .collect();
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    let (y_min, y_max) = value_bounds(rows.iter().map(|r| r.value));

    let series = Series::default()
        .name(value_label.to_string())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.chart_line)
        .data(&points);

    let chart = Chart::new(vec![series])
        .block(chart_block(title, theme))
        .x_axis(date_axis(&dates, theme))
        .y_axis(
            Axis::default()
                .title(Span::styled(value_label.to_string(), theme.label))
                .style(theme.axis)
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format_price(y_min)),
                    Span::raw(format_price((y_min + y_max) / 2.0)),
                    Span::raw(format_price(y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// One vertical bar per trading day.
pub fn render_volume_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[DatedVolume],
    theme: &Theme,
) {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.volume as f64))
        .collect();
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    let max_volume = rows.iter().map(|r| r.volume).max().unwrap_or(0);
    let y_max = if max_volume == 0 { 1.0 } else { max_volume as f64 };

    let series = Series::default()
        .name("Volume")
        .marker(symbols::Marker::HalfBlock)
        .graph_type(GraphType::Bar)
        .style(theme.chart_bar)
        .data(&points);

    let chart = Chart::new(vec![series])
        .block(chart_block(title, theme))
        .x_axis(date_axis(&dates, theme))
        .y_axis(
            Axis::default()
                .title(Span::styled("Volume", theme.label))
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format_volume(max_volume / 2)),
                    Span::raw(format_volume(max_volume)),
                ]),
        );

    frame.render_widget(chart, area);
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn chart_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {} ", title), theme.header))
}

fn date_axis<'a>(dates: &[NaiveDate], theme: &Theme) -> Axis<'a> {
    let upper = dates.len().saturating_sub(1).max(1) as f64;
    Axis::default()
        .title(Span::styled("Date", theme.label))
        .style(theme.axis)
        .bounds([0.0, upper])
        .labels(date_labels(dates).into_iter().map(Span::raw).collect::<Vec<_>>())
}

/// First, middle, and last date. Fewer labels for very short series.
fn date_labels(dates: &[NaiveDate]) -> Vec<String> {
    match dates.len() {
        0 => Vec::new(),
        1 => vec![format_date(dates[0])],
        2 => vec![format_date(dates[0]), format_date(dates[1])],
        n => vec![
            format_date(dates[0]),
            format_date(dates[n / 2]),
            format_date(dates[n - 1]),
        ],
    }
}

/// `(min, max)` of the values, widened to a non-zero span.
fn value_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    (min, max)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
