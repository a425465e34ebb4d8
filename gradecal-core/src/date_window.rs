//! Inclusive date window for event generation.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{GradeCalError, GradeCalResult};

/// Inclusive `[start, end]` range of calendar dates, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> GradeCalResult<Self> {
        if start > end {
            return Err(GradeCalError::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(DateWindow { start, end })
    }

    /// Build a window from two user-typed dates (`dd/mm/yyyy` or `yyyy-mm-dd`).
    pub fn from_args(start: &str, end: &str) -> GradeCalResult<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the window, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}

/// Parse `dd/mm/yyyy`, falling back to ISO `yyyy-mm-dd`.
pub fn parse_date(s: &str) -> GradeCalResult<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|_| GradeCalError::InvalidDate(s.to_string()))
}
