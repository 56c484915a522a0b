use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark; 7–15 are light. Absent or unparseable means dark.
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(value: Option<&str>) -> BackgroundType {
    let bg = value
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.parse::<u8>().ok());
    match bg {
        Some(n) if n > 6 => BackgroundType::Light,
        _ => BackgroundType::Dark,
    }
}

/// Whether gradients may use 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    TrueColor,
    /// The basic 8-colour ANSI set only.
    Basic,
}

/// Every style the dashboard draws with.
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,

    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    pub conclusion: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,
    pub error: Style,

    // ── Selectors ────────────────────────────────────────────────────────────
    pub selected: Style,
    pub unselected: Style,
    pub border: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_line: Style,
    pub chart_bar: Style,
    pub axis: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark purple-grey dashboard palette (default).
    pub fn dark() -> Self {
        let text = Color::Rgb(0xEA, 0xEA, 0xEA);
        let green = Color::Rgb(0x1D, 0xB9, 0x54);
        let teal = Color::Rgb(0x0D, 0x73, 0x77);
        let gold = Color::Rgb(0xFF, 0xD7, 0x00);
        let red = Color::Rgb(0xE7, 0x4C, 0x3C);
        let muted = Color::Rgb(0x8A, 0x8A, 0xA3);

        Self {
            palette: Palette::TrueColor,

            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(green),
            separator: Style::default().fg(Color::Rgb(0x3A, 0x3A, 0x4F)),

            text: Style::default().fg(text),
            dim: Style::default().fg(muted),
            label: Style::default().fg(muted),
            value: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            conclusion: Style::default().fg(text),

            warning: Style::default().fg(gold),
            error: Style::default().fg(red).add_modifier(Modifier::BOLD),

            selected: Style::default()
                .fg(Color::White)
                .bg(green)
                .add_modifier(Modifier::BOLD),
            unselected: Style::default().fg(text),
            border: Style::default().fg(teal),

            chart_line: Style::default().fg(green),
            chart_bar: Style::default().fg(Color::Rgb(0x63, 0x6E, 0xFA)),
            axis: Style::default().fg(muted),

            table_header: Style::default().fg(green).add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(text),
            table_row_alt: Style::default().fg(muted),
        }
    }

    /// Light-background palette.
    pub fn light() -> Self {
        Self {
            palette: Palette::TrueColor,

            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            conclusion: Style::default().fg(Color::Black),

            warning: Style::default().fg(Color::Rgb(0xB3, 0x6B, 0x00)),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            unselected: Style::default().fg(Color::Black),
            border: Style::default().fg(Color::Gray),

            chart_line: Style::default().fg(Color::Blue),
            chart_bar: Style::default().fg(Color::Blue),
            axis: Style::default().fg(Color::DarkGray),

            table_header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            palette: Palette::Basic,

            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            conclusion: Style::default().fg(Color::White),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            unselected: Style::default().fg(Color::White),
            border: Style::default().fg(Color::DarkGray),

            chart_line: Style::default().fg(Color::Green),
            chart_bar: Style::default().fg(Color::Cyan),
            axis: Style::default().fg(Color::Gray),

            table_header: Style::default().fg(Color::Cyan),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Choose a theme from the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Gradients ────────────────────────────────────────────────────────────

    /// Heatmap cell style for a correlation coefficient in `[-1, 1]`.
    ///
    /// Blue for negative, near-white for zero, red for positive (coolwarm).
    pub fn heatmap_style(&self, value: f64) -> Style {
        let v = if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 };
        match self.palette {
            Palette::TrueColor => {
                let bg = coolwarm(v);
                let fg = if v.abs() > 0.5 { Color::White } else { Color::Black };
                Style::default().fg(fg).bg(bg)
            }
            Palette::Basic => {
                let bg = if v >= 0.33 {
                    Color::Red
                } else if v <= -0.33 {
                    Color::Blue
                } else {
                    Color::White
                };
                let fg = if bg == Color::White { Color::Black } else { Color::White };
                Style::default().fg(fg).bg(bg)
            }
        }
    }

    /// Bar style for rank `index` of `count` in the top-N chart.
    ///
    /// Shades run from a light purple for the first bar to deep purple for
    /// the last.
    pub fn top_n_bar_style(&self, index: usize, count: usize) -> Style {
        match self.palette {
            Palette::TrueColor => {
                let t = if count > 1 {
                    index as f64 / (count - 1) as f64
                } else {
                    1.0
                };
                Style::default().fg(lerp_rgb((158, 154, 200), (63, 0, 125), t))
            }
            Palette::Basic => Style::default().fg(Color::Magenta),
        }
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

/// Diverging blue-white-red ramp over `[-1, 1]`.
pub fn coolwarm(value: f64) -> Color {
    const COOL: (u8, u8, u8) = (59, 76, 192);
    const MID: (u8, u8, u8) = (221, 221, 221);
    const WARM: (u8, u8, u8) = (180, 4, 38);

    let v = value.clamp(-1.0, 1.0);
    if v < 0.0 {
        lerp_rgb(MID, COOL, -v)
    } else {
        lerp_rgb(MID, WARM, v)
    }
}

fn lerp_rgb(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
