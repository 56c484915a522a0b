//! CSV loading for Stock Insights.
//!
//! Reads the daily price history once at start-up into an immutable
//! [`Dataset`]. Every problem with the file is a fatal [`LoadError`].

use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use insights_core::dates::parse_trading_date;
use insights_core::error::{LoadError, LoadResult};
use insights_core::models::DailyRecord;
use tracing::{debug, info, warn};

use crate::filter::{filter_by_year, YearView};

/// Columns that must be present in the header row. Names are case-sensitive.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The loaded price history.
///
/// Built once and then only ever borrowed; there is no way to mutate or
/// reload it.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: Option<PathBuf>,
    records: Vec<DailyRecord>,
}

impl Dataset {
    /// Load and validate the CSV at `path`.
    pub fn load(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let started = std::time::Instant::now();
        let records = load_records(path)?;
        let dataset = Self {
            source: Some(path.to_path_buf()),
            records,
        };

        info!(
            "Loaded {} records spanning {} years from {} in {:.1} ms",
            dataset.len(),
            dataset.years().len(),
            path.display(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(dataset)
    }

    /// Wrap records that are already in memory.
    pub fn from_records(records: Vec<DailyRecord>) -> Self {
        Self {
            source: None,
            records,
        }
    }

    /// All records, in file order.
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// File the records were read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years present in the data, ascending.
    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().map(DailyRecord::year).collect()
    }

    /// Records whose year equals `year`.
    pub fn view(&self, year: i32) -> YearView<'_> {
        filter_by_year(&self.records, year)
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Open `path` and parse every row into a [`DailyRecord`].
pub fn load_records(path: &Path) -> LoadResult<Vec<DailyRecord>> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file)
}

/// Parse CSV text from any reader.
///
/// Cells are trimmed; extra columns are ignored; rows keep their file order.
pub fn read_records<R: Read>(reader: R) -> LoadResult<Vec<DailyRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    let mut seen_dates = HashSet::new();
    let mut duplicates = 0usize;

    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let record = columns.parse_row(&row, line)?;
        if !seen_dates.insert(record.date) {
            duplicates += 1;
        }
        records.push(record);
    }

    if duplicates > 0 {
        warn!("{} rows repeat an earlier trading date", duplicates);
    }
    debug!("Parsed {} rows", records.len());

    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Header positions of [`REQUIRED_COLUMNS`], in the same order.
struct ColumnIndex([usize; REQUIRED_COLUMNS.len()]);

impl ColumnIndex {
    /// The first required column absent from `headers` is the one reported.
    fn resolve(headers: &StringRecord) -> LoadResult<Self> {
        let mut positions = [0; REQUIRED_COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
        }
        Ok(Self(positions))
    }

    fn parse_row(&self, row: &StringRecord, line: u64) -> LoadResult<DailyRecord> {
        let [date, open, high, low, close, volume] = self.0.map(|idx| row.get(idx).unwrap_or(""));
        let price = |i: usize, value: &str| parse_price(value, REQUIRED_COLUMNS[i], line);

        let trading_date = parse_trading_date(date).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: date.to_string(),
        })?;

        Ok(DailyRecord::new(
            trading_date,
            price(1, open)?,
            price(2, high)?,
            price(3, low)?,
            price(4, close)?,
            parse_volume(volume, line)?,
        ))
    }
}

fn invalid(column: &str, value: &str, line: u64) -> LoadError {
    LoadError::InvalidNumber {
        line,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn parse_price(value: &str, column: &str, line: u64) -> LoadResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(column, value, line))
}

/// Volumes are whole share counts. Integral float spellings such as
/// `1500.0` are accepted.
fn parse_volume(value: &str, line: u64) -> LoadResult<u64> {
    if let Ok(v) = value.parse::<u64>() {
        return Ok(v);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(invalid("Volume", value, line)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Date,Open,High,Low,Close,Adj Close,Volume\n";

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(content.as_bytes()).expect("write csv");
        file
    }

    // ── happy path ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_parses_rows_in_file_order() {
        let file = write_csv(&format!(
            "{HEADER}2023-01-02,108,110,108,109,109,1500\n2023-01-01,101,105,100,102,102,1000\n"
        ));
        let dataset = Dataset::load(file.path()).expect("load");

        assert_eq!(dataset.len(), 2);
        let first = &dataset.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(first.high, 110.0);
        assert_eq!(first.volume, 1500);
        assert_eq!(first.year(), 2023);
        assert_eq!(dataset.source(), Some(file.path()));
    }

    #[test]
    fn test_load_accepts_reordered_columns_and_whitespace() {
        let csv = "Volume, Close ,Low,High,Open,Date\n 2000 ,10.5,9,11,10, 2019-05-06\n";
        let records = read_records(csv.as_bytes()).expect("parse");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].close, 10.5);
        assert_eq!(records[0].low, 9.0);
        assert_eq!(records[0].volume, 2000);
    }

    #[test]
    fn test_load_accepts_integral_float_volume() {
        let csv = "Date,Open,High,Low,Close,Volume\n2020-01-01,1,2,0.5,1.5,1500.0\n";
        let records = read_records(csv.as_bytes()).expect("parse");
        assert_eq!(records[0].volume, 1500);
    }

    #[test]
    fn test_years_are_distinct_and_sorted() {
        let csv = "Date,Open,High,Low,Close,Volume\n\
                   2021-01-04,1,2,1,2,10\n\
                   2019-01-02,1,2,1,2,10\n\
                   2021-06-01,1,2,1,2,10\n";
        let dataset = Dataset::from_records(read_records(csv.as_bytes()).unwrap());
        let years: Vec<i32> = dataset.years().into_iter().collect();
        assert_eq!(years, vec![2019, 2021]);
    }

    #[test]
    fn test_header_only_file_loads_empty() {
        let records = read_records("Date,Open,High,Low,Close,Volume\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    // ── load errors ───────────────────────────────────────────────────────────

    #[test]
    fn test_missing_file_is_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::FileRead { .. }), "got {err:?}");
    }

    #[test]
    fn test_missing_column_is_reported_by_name() {
        let csv = "Date,Open,High,Low,Close\n2020-01-01,1,2,0.5,1.5\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Volume"));
    }

    #[test]
    fn test_each_required_column_is_checked() {
        for missing in REQUIRED_COLUMNS {
            let header: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|c| *c != missing)
                .collect();
            let csv = format!("{}\n", header.join(","));
            let err = read_records(csv.as_bytes()).unwrap_err();
            assert!(
                matches!(err, LoadError::MissingColumn(ref c) if c == missing),
                "dropping {missing} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let csv = "date,Open,High,Low,Close,Volume\n2020-01-01,1,2,0.5,1.5,3\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Date"));
    }

    #[test]
    fn test_unparsable_date_reports_line() {
        let csv = "Date,Open,High,Low,Close,Volume\n2020-01-01,1,2,0.5,1.5,3\nsoon,1,2,0.5,1.5,3\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidDate { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_price_reports_column() {
        let csv = "Date,Open,High,Low,Close,Volume\n2020-01-01,1,2,0.5,n/a,3\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(
                err,
                LoadError::InvalidNumber { ref column, line: 2, .. } if column == "Close"
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn test_non_finite_price_rejected() {
        let csv = "Date,Open,High,Low,Close,Volume\n2020-01-01,1,NaN,0.5,1,3\n";
        assert!(read_records(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_negative_or_fractional_volume_rejected() {
        for bad in ["-5", "12.5", "lots"] {
            let csv = format!("Date,Open,High,Low,Close,Volume\n2020-01-01,1,2,0.5,1,{bad}\n");
            let err = read_records(csv.as_bytes()).unwrap_err();
            assert!(
                matches!(err, LoadError::InvalidNumber { ref column, .. } if column == "Volume"),
                "{bad}: got {err:?}"
            );
        }
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let csv = "Date,Open,High,Low,Close,Volume\n2020-01-01,1,2\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)), "got {err:?}");
    }
}
