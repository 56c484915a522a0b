//! Correlation heatmap.
//!
//! A 3×3 grid of coloured cells, one per column pair, each annotated with
//! its coefficient to two decimals.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use insights_core::formatting::format_coefficient;
use insights_core::models::{CorrelationMatrix, CORRELATION_COLUMNS};

use crate::themes::Theme;

/// Cell width and height in terminal cells.
const CELL_WIDTH: u16 = 12;
const CELL_HEIGHT: u16 = 3;

pub fn render_heatmap(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    matrix: &CorrelationMatrix,
    theme: &Theme,
) {
    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(
                CORRELATION_COLUMNS
                    .iter()
                    .map(|name| Cell::from(Line::from(*name).centered())),
            )
            .collect::<Vec<_>>(),
    )
    .style(theme.table_header)
    .bottom_margin(1);

    let rows: Vec<Row> = CORRELATION_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut cells = vec![Cell::from(Text::from(vec![
                Line::from(""),
                Line::from(Span::styled(*name, theme.table_header)),
            ]))];
            cells.extend((0..CORRELATION_COLUMNS.len()).map(|j| {
                let value = matrix.get(i, j);
                Cell::from(Text::from(vec![
                    Line::from(""),
                    Line::from(format_coefficient(value)).centered(),
                ]))
                .style(theme.heatmap_style(value))
            }));
            Row::new(cells).height(CELL_HEIGHT)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(CELL_WIDTH),
        Constraint::Length(CELL_WIDTH),
        Constraint::Length(CELL_WIDTH),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(0)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(Span::styled(format!(" {} ", title), theme.header)),
        );

    frame.render_widget(table, area);
}
