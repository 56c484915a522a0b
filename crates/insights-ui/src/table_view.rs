//! Top-N closing price view.
//!
//! A bordered [`ratatui::widgets::Table`] of the best days beside a bar
//! chart whose bars darken from the first rank to the last.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Padding, Row, Table},
    Frame,
};

use insights_core::formatting::{format_date, format_price, format_short_date};
use insights_core::models::DailyRecord;

use crate::themes::Theme;

/// Width of the table column on the left.
const TABLE_WIDTH: u16 = 36;

/// Table and gradient bars for the top days by closing price.
pub fn render_top_n_view(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[DailyRecord],
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {} ", title), theme.header));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [table_area, bars_area] =
        Layout::horizontal([Constraint::Length(TABLE_WIDTH), Constraint::Min(0)]).areas(inner);

    render_top_n_table(frame, table_area, rows, theme);
    render_top_n_bars(frame, bars_area, rows, theme);
}

fn render_top_n_table(frame: &mut Frame, area: Rect, rows: &[DailyRecord], theme: &Theme) {
    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Date"),
        Cell::from(Line::from("Close").right_aligned()),
    ])
    .style(theme.table_header)
    .bottom_margin(1);

    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(format_date(r.date)),
                Cell::from(Line::from(format_price(r.close)).right_aligned()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(12),
        Constraint::Min(10),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::RIGHT).border_style(theme.separator));

    frame.render_widget(table, area);
}

fn render_top_n_bars(frame: &mut Frame, area: Rect, rows: &[DailyRecord], theme: &Theme) {
    // Bar heights are integral; cents keep neighbouring closes apart.
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let style = theme.top_n_bar_style(i, rows.len());
            Bar::default()
                .value((r.close.max(0.0) * 100.0).round() as u64)
                .text_value(format_price(r.close))
                .label(Line::from(format_short_date(r.date)))
                .style(style)
                .value_style(style.add_modifier(Modifier::REVERSED))
        })
        .collect();

    let count = rows.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(1) / count)
        .saturating_sub(1)
        .clamp(1, 12);

    let chart = BarChart::default()
        .block(Block::default().padding(Padding::horizontal(1)))
        .bar_width(bar_width)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
