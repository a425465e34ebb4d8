//! Wall-clock time ranges ("07:30 - 08:25").

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{GradeCalError, GradeCalResult};

/// Hyphen, en-dash and em-dash. OCR output mixes all three.
pub const DASHES: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

pub fn is_dash(c: char) -> bool {
    DASHES.contains(&c)
}

/// Replace every dash-family glyph with an ASCII hyphen.
pub fn normalize_dashes(s: &str) -> String {
    s.chars().map(|c| if is_dash(c) { '-' } else { c }).collect()
}

/// A start/end pair of wall-clock times, with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> GradeCalResult<Self> {
        if start >= end {
            return Err(GradeCalError::EmptyTimeRange {
                start: start.format("%H:%M").to_string(),
                end: end.format("%H:%M").to_string(),
            });
        }
        Ok(TimeRange { start, end })
    }

    /// Parse a token such as `"07:30 - 08:25"` or `"07:30–08:25"`.
    pub fn parse(token: &str) -> GradeCalResult<Self> {
        let normalized = normalize_dashes(token.trim());
        let parts: Vec<&str> = normalized.split('-').map(str::trim).collect();

        let [start, end] = parts.as_slice() else {
            return Err(GradeCalError::InvalidTimeRange(token.to_string()));
        };
        if start.is_empty() || end.is_empty() {
            return Err(GradeCalError::InvalidTimeRange(token.to_string()));
        }

        Self::new(parse_clock(start)?, parse_clock(end)?)
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when `next` starts exactly where this range ends.
    pub fn abuts(&self, next: &TimeRange) -> bool {
        self.end == next.start
    }
}

fn parse_clock(s: &str) -> GradeCalResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| GradeCalError::InvalidTime(s.to_string()))
}

impl FromStr for TimeRange {
    type Err = GradeCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::parse(s)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}
