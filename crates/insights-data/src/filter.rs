//! Year filtering.

use insights_core::error::{InsightError, InsightResult};
use insights_core::models::DailyRecord;

/// The records of one calendar year, borrowed from the dataset in input
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct YearView<'a> {
    year: i32,
    records: Vec<&'a DailyRecord>,
}

impl<'a> YearView<'a> {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn records(&self) -> &[&'a DailyRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a DailyRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fail with [`InsightError::EmptyView`] when no record matched.
    pub fn require_data(self) -> InsightResult<Self> {
        if self.records.is_empty() {
            Err(InsightError::EmptyView { year: self.year })
        } else {
            Ok(self)
        }
    }

    /// Owned copies of the matching records.
    pub fn to_records(&self) -> Vec<DailyRecord> {
        self.records.iter().map(|r| (*r).clone()).collect()
    }
}

/// Select the records whose date falls in `year` (exact match).
pub fn filter_by_year(records: &[DailyRecord], year: i32) -> YearView<'_> {
    YearView {
        year,
        records: records.iter().filter(|r| r.year() == year).collect(),
    }
}
