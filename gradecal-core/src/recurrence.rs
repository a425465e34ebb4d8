//! Weekly expansion of sessions over a date window.

use std::iter::FusedIterator;

use chrono::{Datelike, Days, NaiveDate};

use crate::date_window::DateWindow;
use crate::session::Session;
use crate::time_range::TimeRange;

/// One concrete date of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub date: NaiveDate,
    pub range: TimeRange,
    pub code: &'a str,
}

/// Lazy sequence of a session's occurrences, one per week.
///
/// Cloning the iterator restarts from the same position.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    session: &'a Session,
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl<'a> Occurrences<'a> {
    pub fn new(session: &'a Session, window: &DateWindow) -> Self {
        // First date on or after the window start with the session's weekday.
        let from = window.start().weekday().num_days_from_monday();
        let to = session.weekday.num_days_from_monday();
        let offset = (7 + to - from) % 7;

        Occurrences {
            session,
            cursor: window.start().checked_add_days(Days::new(u64::from(offset))),
            end: window.end(),
        }
    }

    fn remaining(&self) -> usize {
        match self.cursor {
            Some(cursor) if cursor <= self.end => ((self.end - cursor).num_days() / 7 + 1) as usize,
            _ => 0,
        }
    }
}

impl<'a> Iterator for Occurrences<'a> {
    type Item = Occurrence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.cursor.filter(|d| *d <= self.end)?;
        self.cursor = date.checked_add_days(Days::new(7));

        let session = self.session;
        Some(Occurrence {
            date,
            range: session.range,
            code: &session.code,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Occurrences<'_> {}

impl FusedIterator for Occurrences<'_> {}
