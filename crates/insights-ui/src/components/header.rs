use crate::themes::Theme;
use insights_core::models::Insight;
use ratatui::text::{Line, Span};

/// Application title.
pub const TITLE: &str = "SBIN STOCK DATA INSIGHTS";

/// Accent placed either side of the title.
pub const ACCENT: &str = "▲ ▼ ▲";

/// Width of the `=` rule under the title.
const SEPARATOR_WIDTH: usize = 60;

/// Dashboard header rendering four lines:
///
/// 1. Title with accents.
/// 2. A 60-column `=` separator.
/// 3. The current selection as `[ year | insight ]`.
/// 4. An empty line.
pub struct Header<'a> {
    pub year: i32,
    pub insight: Insight,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(year: i32, insight: Insight, theme: &'a Theme) -> Self {
        Self {
            year,
            insight,
            theme,
        }
    }

    /// Number of terminal rows [`Header::to_lines`] occupies.
    pub const HEIGHT: u16 = 4;

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(format!(" {} ", TITLE), self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(
                "=".repeat(SEPARATOR_WIDTH),
                self.theme.separator,
            )),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.year.to_string(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.insight.label(), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}
