use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use insights_core::error::InsightError;
use insights_core::models::Insight;

use crate::themes::Theme;

/// Box drawn in place of a chart when the insight cannot be shown.
///
/// An empty year is a warning; an undefined correlation is an error.
pub fn render_notice(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    error: &InsightError,
    theme: &Theme,
) {
    let style = match error {
        InsightError::EmptyView { .. } => theme.warning,
        InsightError::DegenerateCorrelation { .. } => theme.error,
    };
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(format!("⚠  {}", error.user_message()), style)),
        Line::from(""),
        Line::from(Span::styled(
            "Pick another year or insight to continue.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border)
                    .title(format!(" {} ", title)),
            ),
        area,
    );
}

/// The insight's interpretation, under the chart.
pub fn render_conclusion(frame: &mut Frame, area: Rect, insight: Insight, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled("Conclusion", theme.header_accent)),
        Line::from(Span::styled(insight.conclusion(), theme.conclusion)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(theme.separator),
            ),
        area,
    );
}
