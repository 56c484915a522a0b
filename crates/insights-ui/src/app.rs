//! Application state and TUI event loop for Stock Insights.
//!
//! [`App`] borrows the loaded [`Dataset`], owns the current [`Selection`],
//! and keeps the output of the one pipeline call made for it. Every change
//! of year or insight recomputes that output; nothing else does.

use std::io;
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use insights_core::error::InsightResult;
use insights_core::models::{Insight, InsightOutput};
use insights_core::settings::{MAX_YEAR, MIN_YEAR};
use insights_data::pipeline::run_insight;
use insights_data::Dataset;

use crate::chart_view;
use crate::components::header::Header;
use crate::components::notice;
use crate::components::selector::{self, Selection};
use crate::heatmap_view;
use crate::table_view;
use crate::themes::Theme;

const SIDEBAR_WIDTH: u16 = 46;
const CONCLUSION_HEIGHT: u16 = 7;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App<'a> {
    dataset: &'a Dataset,
    pub theme: Theme,
    selection: Selection,
    result: InsightResult<InsightOutput>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    computations: usize,
    /// Distinct years in the dataset; fixed for the life of the app.
    years_with_data: usize,
}

impl<'a> App<'a> {
    /// Build the dashboard and compute the initial insight.
    pub fn new(dataset: &'a Dataset, theme_name: &str, year: i32, insight: Insight) -> Self {
        let selection = Selection::new(year, insight);
        let mut app = Self {
            dataset,
            theme: Theme::from_name(theme_name),
            selection,
            result: Ok(InsightOutput::PriceRange(Vec::new())),
            should_quit: false,
            computations: 0,
            years_with_data: dataset.years().len(),
        };
        app.refresh();
        app
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Output for the current selection, or the recoverable error it raised.
    pub fn result(&self) -> &InsightResult<InsightOutput> {
        &self.result
    }

    /// Number of pipeline calls made so far.
    pub fn computations(&self) -> usize {
        self.computations
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until the user quits.
    ///
    /// The terminal is restored on every exit path, including when this
    /// future is dropped by the caller.
    pub async fn run(mut self) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            // Lets the caller's Ctrl+C listener run between ticks.
            tokio::task::yield_now().await;
        }

        terminal.show_cursor()?;
        Ok(())
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let changed = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                false
            }
            KeyCode::Left | KeyCode::Char('h') => self.selection.step_year(-1),
            KeyCode::Right | KeyCode::Char('l') => self.selection.step_year(1),
            KeyCode::Home => self.selection.set_year(MIN_YEAR),
            KeyCode::End => self.selection.set_year(MAX_YEAR),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selection.next_insight();
                true
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.selection.prev_insight();
                true
            }
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                self.selection.set_insight(Insight::ALL[idx])
            }
            _ => false,
        };

        if changed {
            self.refresh();
        }
    }

    /// Recompute the output for the current selection.
    fn refresh(&mut self) {
        let (year, insight) = (self.selection.year(), self.selection.insight());
        self.result = run_insight(insight, self.dataset.records(), year);
        self.computations += 1;

        if let Err(e) = &self.result {
            debug!("Showing notice for {} / {}: {}", year, insight.key(), e);
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Draw the whole dashboard into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(Header::HEIGHT), Constraint::Min(0)])
                .areas(frame.area());
        let [sidebar_area, main_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .areas(body_area);

        let header = Header::new(self.selection.year(), self.selection.insight(), &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        self.render_sidebar(frame, sidebar_area);
        self.render_main(frame, main_area);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut lines = selector::year_lines(&self.selection, self.years_with_data, theme);
        lines.push(Line::from(""));
        lines.extend(selector::insight_lines(&self.selection, theme));
        lines.push(Line::from(""));
        lines.extend(selector::help_lines(theme));

        frame.render_widget(
            Paragraph::new(Text::from(lines)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border),
            ),
            area,
        );
    }

    fn render_main(&self, frame: &mut Frame, area: Rect) {
        let insight = self.selection.insight();
        let title = insight.title(self.selection.year());
        let theme = &self.theme;

        let output = match &self.result {
            Ok(output) => output,
            Err(e) => {
                notice::render_notice(frame, area, insight.label(), e, theme);
                return;
            }
        };

        let [view_area, conclusion_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(CONCLUSION_HEIGHT)])
                .areas(area);

        match output {
            InsightOutput::PriceRange(rows) | InsightOutput::Trend(rows) => {
                chart_view::render_line_chart(
                    frame,
                    view_area,
                    &title,
                    insight.value_label(),
                    rows,
                    theme,
                );
            }
            InsightOutput::Volume(rows) => {
                chart_view::render_volume_chart(frame, view_area, &title, rows, theme);
            }
            InsightOutput::TopN(rows) => {
                table_view::render_top_n_view(frame, view_area, &title, rows, theme);
            }
            InsightOutput::Correlation(matrix) => {
                heatmap_view::render_heatmap(frame, view_area, &title, matrix, theme);
            }
        }

        notice::render_conclusion(frame, conclusion_area, insight, theme);
    }
}

// ── Terminal guard ────────────────────────────────────────────────────────────

/// Raw mode plus the alternate screen, undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use chrono::NaiveDate;
    use crossterm::event::KeyEventState;
    use insights_core::error::InsightError;
    use insights_core::models::DailyRecord;
    use ratatui::backend::TestBackend;

    fn rec(y: i32, m: u32, d: u32, low: f64, high: f64, close: f64, volume: u64) -> DailyRecord {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        DailyRecord::new(date, low, high, low, close, volume)
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            rec(2022, 12, 30, 95.0, 99.0, 97.0, 800),
            rec(2023, 1, 2, 100.0, 105.0, 102.0, 1_000),
            rec(2023, 1, 3, 108.0, 110.0, 109.0, 1_500),
            rec(2023, 1, 4, 103.0, 107.0, 104.0, 1_200),
            rec(2024, 1, 1, 200.0, 200.0, 200.0, 500),
        ])
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn draw(app: &App<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(130, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    // ── construction ─────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_computes_once() {
        let data = dataset();
        let app = App::new(&data, "dark", 2023, Insight::DailyPriceRange);

        assert_eq!(app.selection().year(), 2023);
        assert_eq!(app.computations(), 1);
        assert!(!app.should_quit);
        match app.result() {
            Ok(InsightOutput::PriceRange(rows)) => {
                let ranges: Vec<f64> = rows.iter().map(|r| r.value).collect();
                assert_eq!(ranges, vec![5.0, 2.0, 4.0]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_app_creation_unknown_theme_falls_back() {
        let data = dataset();
        let app = App::new(&data, "nonexistent", 2023, Insight::DailyPriceRange);
        assert!(app.theme.header.fg.is_some());
    }

    // ── key handling ─────────────────────────────────────────────────────────

    #[test]
    fn test_year_keys_step_and_recompute() {
        let data = dataset();
        let mut app = App::new(&data, "dark", 2023, Insight::PerformanceTrend);

        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.selection().year(), 2022);
        assert_eq!(app.computations(), 2);

        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.selection().year(), 2023);
        assert_eq!(app.computations(), 3);
    }

    #[test]
    fn test_year_clamped_without_recompute() {
        let data = dataset();
        let mut app = App::new(&data, "dark", MAX_YEAR, Insight::TopNByClose);

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.selection().year(), MAX_YEAR);
        assert_eq!(app.computations(), 1);

        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.selection().year(), MIN_YEAR);
        app.handle_key(key(KeyCode::End));
        assert_eq!(app.selection().year(), MAX_YEAR);
        assert_eq!(app.computations(), 3);
    }

    #[test]
    fn test_insight_keys_cycle_and_jump() {
        let data = dataset();
        let mut app = App::new(&data, "dark", 2023, Insight::DailyPriceRange);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selection().insight(), Insight::PerformanceTrend);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.selection().insight(), Insight::DailyPriceRange);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selection().insight(), Insight::Correlation);

        app.handle_key(key(KeyCode::Char('4')));
        assert_eq!(app.selection().insight(), Insight::TopNByClose);
        assert!(matches!(app.result(), Ok(InsightOutput::TopN(rows)) if rows.len() == 3));

        // Re-selecting the current insight is not a change.
        let before = app.computations();
        app.handle_key(key(KeyCode::Char('4')));
        assert_eq!(app.computations(), before);
    }

    #[test]
    fn test_quit_keys() {
        let data = dataset();
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            let mut app = App::new(&data, "dark", 2023, Insight::DailyPriceRange);
            app.handle_key(key(code));
            assert!(app.should_quit, "{code:?} should quit");
        }

        let mut app = App::new(&data, "dark", 2023, Insight::DailyPriceRange);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let data = dataset();
        let mut app = App::new(&data, "dark", 2023, Insight::DailyPriceRange);
        app.handle_key(key(KeyCode::Char('c')));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let data = dataset();
        let mut app = App::new(&data, "dark", 2023, Insight::DailyPriceRange);
        app.handle_key(KeyEvent::new_with_kind_and_state(
            KeyCode::Right,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        assert_eq!(app.selection().year(), 2023);
    }

    // ── recoverable errors ───────────────────────────────────────────────────

    #[test]
    fn test_empty_year_keeps_app_interactive() {
        let data = dataset();
        let mut app = App::new(&data, "dark", 2005, Insight::VolumeOverTime);
        assert_eq!(app.result(), &Err(InsightError::EmptyView { year: 2005 }));

        let text = draw(&app);
        assert!(text.contains("No data available for the selected year."));

        app.handle_key(key(KeyCode::End));
        app.handle_key(key(KeyCode::Left));
        assert!(matches!(app.result(), Ok(InsightOutput::Volume(rows)) if rows.len() == 3));
    }

    #[test]
    fn test_single_row_year_correlation_notice() {
        let data = dataset();
        let app = App::new(&data, "dark", 2024, Insight::Correlation);
        assert!(matches!(
            app.result(),
            Err(InsightError::DegenerateCorrelation { year: 2024, .. })
        ));
        assert!(draw(&app).contains("Not enough variation"));
    }

    // ── rendering ────────────────────────────────────────────────────────────

    #[test]
    fn test_render_every_insight_does_not_panic() {
        let data = dataset();
        let mut app = App::new(&data, "dark", 2023, Insight::DailyPriceRange);
        for _ in Insight::ALL {
            let text = draw(&app);
            assert!(text.contains("SBIN STOCK DATA INSIGHTS"));
            assert!(text.contains("Conclusion"));
            app.handle_key(key(KeyCode::Tab));
        }
    }

    #[test]
    fn test_render_shows_top_n_title_with_year() {
        let data = dataset();
        let app = App::new(&data, "light", 2023, Insight::TopNByClose);
        let text = draw(&app);
        assert!(text.contains("Top 5 Days by Closing Price in 2023"));
        assert!(text.contains("2023-01-03"));
    }

    #[test]
    fn test_sidebar_counts_years_with_data() {
        let data = dataset();
        let mut app = App::new(&data, "dark", 2023, Insight::DailyPriceRange);
        assert_eq!(app.years_with_data, 3);
        assert!(draw(&app).contains("3 with data"));

        // Stepping the year leaves the count alone.
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.years_with_data, 3);
        assert!(draw(&app).contains("3 with data"));
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let data = dataset();
        let app = App::new(&data, "classic", 2023, Insight::Correlation);
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
