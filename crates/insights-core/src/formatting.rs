use chrono::NaiveDate;

/// Format a number with thousands separators and a fixed number of decimal
/// places.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    // `-0.00` is printed as `0.00`.
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a share price with two decimals and thousands separators.
///
/// ```
/// use insights_core::formatting::format_price;
///
/// assert_eq!(format_price(812.4), "812.40");
/// assert_eq!(format_price(1050.0), "1,050.00");
/// ```
pub fn format_price(price: f64) -> String {
    format_number(price, 2)
}

/// Format a traded volume compactly: `950`, `12.5K`, `3.40M`, `1.20B`.
///
/// ```
/// use insights_core::formatting::format_volume;
///
/// assert_eq!(format_volume(950), "950");
/// assert_eq!(format_volume(12_500), "12.5K");
/// assert_eq!(format_volume(3_400_000), "3.40M");
/// ```
pub fn format_volume(volume: u64) -> String {
    let v = volume as f64;
    if volume >= 1_000_000_000 {
        format!("{:.2}B", v / 1e9)
    } else if volume >= 1_000_000 {
        format!("{:.2}M", v / 1e6)
    } else if volume >= 1_000 {
        format!("{:.1}K", v / 1e3)
    } else {
        volume.to_string()
    }
}

/// Format a correlation coefficient as the heatmap annotates it (`.2f`).
pub fn format_coefficient(value: f64) -> String {
    format!("{:.2}", value)
}

/// ISO date label used in tables and axis ticks.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Short axis tick label such as `Mar 07`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
