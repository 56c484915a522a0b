//! One-shot output for `--output json` and `--output text`.

use serde::Serialize;

use insights_core::formatting::{format_coefficient, format_date, format_number, format_price};
use insights_core::models::{Insight, InsightOutput, CORRELATION_COLUMNS};

/// Everything printed for one pipeline call.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub year: i32,
    /// The `--insight` key.
    #[serde(rename = "insight")]
    pub key: &'static str,
    #[serde(skip)]
    pub insight: Insight,
    pub title: String,
    pub conclusion: &'static str,
    pub output: &'a InsightOutput,
}

impl<'a> Report<'a> {
    pub fn new(year: i32, insight: Insight, output: &'a InsightOutput) -> Self {
        Self {
            year,
            key: insight.key(),
            insight,
            title: insight.title(year),
            conclusion: insight.conclusion(),
            output,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Title, year, an aligned table, then the conclusion.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&"=".repeat(self.title.chars().count()));
        out.push_str(&format!("\nYear: {}\n\n", self.year));

        let rows = table_rows(self.insight, self.output);
        out.push_str(&align(&rows));
        out.push('\n');
        out.push_str(self.conclusion);
        out.push('\n');
        out
    }
}

/// Header row followed by one row per output entry.
fn table_rows(insight: Insight, output: &InsightOutput) -> Vec<Vec<String>> {
    let value_label = insight.value_label().to_string();
    match output {
        InsightOutput::PriceRange(rows) | InsightOutput::Trend(rows) => {
            std::iter::once(vec!["Date".to_string(), value_label])
                .chain(
                    rows.iter()
                        .map(|r| vec![format_date(r.date), format_price(r.value)]),
                )
                .collect()
        }
        InsightOutput::Volume(rows) => std::iter::once(vec!["Date".to_string(), value_label])
            .chain(
                rows.iter()
                    .map(|r| vec![format_date(r.date), format_number(r.volume as f64, 0)]),
            )
            .collect(),
        InsightOutput::TopN(rows) => {
            std::iter::once(vec!["#".to_string(), "Date".to_string(), value_label])
                .chain(rows.iter().enumerate().map(|(i, r)| {
                    vec![(i + 1).to_string(), format_date(r.date), format_price(r.close)]
                }))
                .collect()
        }
        InsightOutput::Correlation(matrix) => {
            let mut header = vec![String::new()];
            header.extend(CORRELATION_COLUMNS.iter().map(|c| c.to_string()));
            std::iter::once(header)
                .chain(CORRELATION_COLUMNS.iter().enumerate().map(|(i, name)| {
                    let mut row = vec![name.to_string()];
                    row.extend(
                        (0..CORRELATION_COLUMNS.len())
                            .map(|j| format_coefficient(matrix.get(i, j))),
                    );
                    row
                }))
                .collect()
        }
    }
}

/// Left-align the first column and right-align the rest.
fn align(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, cell)| {
                if c == 0 {
                    format!("{:<w$}", cell, w = widths[c])
                } else {
                    format!("{:>w$}", cell, w = widths[c])
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
