//! Year and insight selectors.
//!
//! [`Selection`] is the only mutable state of the dashboard. Years are
//! clamped to the selectable range; insights cycle through [`Insight::ALL`].

use crate::themes::Theme;
use insights_core::models::Insight;
use insights_core::settings::{MAX_YEAR, MIN_YEAR};
use ratatui::text::{Line, Span};

/// Current year and insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    year: i32,
    insight: Insight,
}

impl Selection {
    /// Out-of-range years are clamped into `[MIN_YEAR, MAX_YEAR]`.
    pub fn new(year: i32, insight: Insight) -> Self {
        Self {
            year: year.clamp(MIN_YEAR, MAX_YEAR),
            insight,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn insight(&self) -> Insight {
        self.insight
    }

    /// Move the year by `delta`, clamped. Returns `true` if it changed.
    pub fn step_year(&mut self, delta: i32) -> bool {
        self.set_year(self.year.saturating_add(delta))
    }

    /// Set the year, clamped. Returns `true` if it changed.
    pub fn set_year(&mut self, year: i32) -> bool {
        let year = year.clamp(MIN_YEAR, MAX_YEAR);
        let changed = year != self.year;
        self.year = year;
        changed
    }

    pub fn next_insight(&mut self) {
        self.insight = self.insight.next();
    }

    pub fn prev_insight(&mut self) {
        self.insight = self.insight.prev();
    }

    /// Returns `true` if the insight changed.
    pub fn set_insight(&mut self, insight: Insight) -> bool {
        let changed = insight != self.insight;
        self.insight = insight;
        changed
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Year stepper: `◀ 2019 ▶`, with an arrow dimmed at either bound.
pub fn year_lines<'a>(
    selection: &Selection,
    years_with_data: usize,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let left = if selection.year > MIN_YEAR { theme.value } else { theme.dim };
    let right = if selection.year < MAX_YEAR { theme.value } else { theme.dim };

    vec![
        Line::from(Span::styled("Select Year", theme.label)),
        Line::from(vec![
            Span::styled("  ◀ ", left),
            Span::styled(format!(" {} ", selection.year), theme.selected),
            Span::styled(" ▶", right),
        ]),
        Line::from(Span::styled(
            format!("{}–{} · {} with data", MIN_YEAR, MAX_YEAR, years_with_data),
            theme.dim,
        )),
    ]
}

/// Numbered list of the five insights with the current one highlighted.
pub fn insight_lines<'a>(selection: &Selection, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled("Select Insight", theme.label))];
    for (i, insight) in Insight::ALL.iter().enumerate() {
        let style = if *insight == selection.insight {
            theme.selected
        } else {
            theme.unselected
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), theme.dim),
            Span::styled(insight.label(), style),
        ]));
    }
    lines
}

/// Key reference shown under the selectors.
pub fn help_lines<'a>(theme: &Theme) -> Vec<Line<'a>> {
    [
        ("←/→ h/l", "year"),
        ("Home/End", "first/last year"),
        ("↑/↓ j/k", "insight"),
        ("Tab/S-Tab", "next/previous insight"),
        ("1-5", "jump to insight"),
        ("q Esc", "quit"),
    ]
    .into_iter()
    .map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("{:>9} ", key), theme.value),
            Span::styled(action, theme.text),
        ])
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    // ── selection state ──────────────────────────────────────────────────────

    #[test]
    fn test_new_clamps_year() {
        assert_eq!(Selection::new(1990, Insight::Correlation).year(), MIN_YEAR);
        assert_eq!(Selection::new(2077, Insight::Correlation).year(), MAX_YEAR);
        assert_eq!(Selection::new(2015, Insight::Correlation).year(), 2015);
    }

    #[test]
    fn test_step_year_clamps_at_bounds() {
        let mut s = Selection::new(MAX_YEAR, Insight::DailyPriceRange);
        assert!(!s.step_year(1));
        assert_eq!(s.year(), MAX_YEAR);
        assert!(s.step_year(-1));
        assert_eq!(s.year(), MAX_YEAR - 1);

        let mut s = Selection::new(MIN_YEAR, Insight::DailyPriceRange);
        assert!(!s.step_year(-1));
        assert_eq!(s.year(), MIN_YEAR);
    }

    #[test]
    fn test_step_year_extreme_delta_does_not_overflow() {
        let mut s = Selection::new(2010, Insight::DailyPriceRange);
        s.step_year(i32::MAX);
        assert_eq!(s.year(), MAX_YEAR);
        s.step_year(i32::MIN);
        assert_eq!(s.year(), MIN_YEAR);
    }

    #[test]
    fn test_insight_cycles_in_both_directions() {
        let mut s = Selection::new(2020, Insight::Correlation);
        s.next_insight();
        assert_eq!(s.insight(), Insight::DailyPriceRange);
        s.prev_insight();
        assert_eq!(s.insight(), Insight::Correlation);
    }

    #[test]
    fn test_set_insight_reports_change() {
        let mut s = Selection::new(2020, Insight::TopNByClose);
        assert!(!s.set_insight(Insight::TopNByClose));
        assert!(s.set_insight(Insight::VolumeOverTime));
    }

    // ── rendering ────────────────────────────────────────────────────────────

    #[test]
    fn test_year_lines_show_year() {
        let theme = Theme::dark();
        let lines = year_lines(&Selection::new(2019, Insight::Correlation), 3, &theme);
        assert!(text(&lines[1]).contains("2019"));
        assert!(text(&lines[2]).contains("3 with data"));
    }

    #[test]
    fn test_year_lines_dim_arrow_at_bound() {
        let theme = Theme::dark();
        let lines = year_lines(&Selection::new(MAX_YEAR, Insight::Correlation), 1, &theme);
        assert_eq!(lines[1].spans[2].style, theme.dim);
        assert_eq!(lines[1].spans[0].style, theme.value);
    }

    #[test]
    fn test_insight_lines_highlight_current() {
        let theme = Theme::dark();
        let lines = insight_lines(&Selection::new(2019, Insight::VolumeOverTime), &theme);
        assert_eq!(lines.len(), 1 + Insight::ALL.len());
        // Header line, then 1-based entries in selector order.
        assert!(text(&lines[3]).contains("Volume Over Time"));
        assert_eq!(lines[3].spans[1].style, theme.selected);
        assert_eq!(lines[1].spans[1].style, theme.unselected);
    }

    #[test]
    fn test_help_lines_mention_quit() {
        let theme = Theme::dark();
        assert!(help_lines(&theme).iter().any(|l| text(l).contains("quit")));
    }

    #[test]
    fn test_help_lines_list_every_binding() {
        let theme = Theme::dark();
        let help: Vec<String> = help_lines(&theme).iter().map(text).collect();
        for key in ["←/→", "h/l", "↑/↓", "j/k", "Tab/S-Tab", "Home/End", "1-5", "q Esc"] {
            assert!(help.iter().any(|l| l.contains(key)), "missing {key}");
        }
    }

    #[test]
    fn test_help_actions_use_text_style() {
        let theme = Theme::light();
        for line in help_lines(&theme) {
            assert_eq!(line.spans[0].style, theme.value);
            assert_eq!(line.spans[1].style, theme.text);
        }
    }
}
