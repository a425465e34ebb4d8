//! Grid blocks and the sessions they merge into.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date_window::DateWindow;
use crate::recurrence::Occurrences;
use crate::time_range::TimeRange;

/// One recognized grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub weekday: Weekday,
    pub range: TimeRange,
    pub code: String,
}

impl Block {
    fn sort_key(&self) -> (u32, &str, TimeRange) {
        (
            self.weekday.num_days_from_monday(),
            self.code.as_str(),
            self.range,
        )
    }
}

/// A merged, contiguous teaching slot. Each session becomes one weekly
/// series of calendar events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    pub weekday: Weekday,
    pub range: TimeRange,
    pub code: String,
}

impl Session {
    /// Every date of this session within `window`, one per week.
    pub fn occurrences<'a>(&'a self, window: &DateWindow) -> Occurrences<'a> {
        Occurrences::new(self, window)
    }
}

impl From<Block> for Session {
    fn from(block: Block) -> Self {
        Session {
            weekday: block.weekday,
            range: block.range,
            code: block.code,
        }
    }
}

impl From<Session> for Block {
    fn from(session: Session) -> Self {
        Block {
            weekday: session.weekday,
            range: session.range,
            code: session.code,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.weekday, self.range, self.code)
    }
}

/// Coalesce back-to-back blocks of the same weekday and code.
///
/// Blocks are ordered by (weekday, code, start, end). A block extends the previous
/// session only when its start equals that session's end exactly; gaps and
/// differing codes always start a new session.
pub fn merge_blocks(mut blocks: Vec<Block>) -> Vec<Session> {
    blocks.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let mut sessions: Vec<Session> = Vec::with_capacity(blocks.len());

    for block in blocks {
        match sessions.last_mut() {
            Some(last)
                if last.weekday == block.weekday
                    && last.code == block.code
                    && last.range.abuts(&block.range) =>
            {
                last.range.end = block.range.end;
            }
            _ => sessions.push(Session::from(block)),
        }
    }

    debug!(sessions = sessions.len(), "merged blocks");
    sessions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(weekday: Weekday, range: &str, code: &str) -> Block {
        Block {
            weekday,
            range: TimeRange::parse(range).unwrap(),
            code: code.to_string(),
        }
    }

    #[test]
    fn back_to_back_blocks_merge() {
        let sessions = merge_blocks(vec![
            block(Weekday::Mon, "07:30-08:25", "SOP"),
            block(Weekday::Mon, "08:25-09:20", "SOP"),
        ]);

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].range, TimeRange::parse("07:30-09:20").unwrap());
    }

    #[test]
    fn chains_of_blocks_merge_regardless_of_input_order() {
        let sessions = merge_blocks(vec![
            block(Weekday::Tue, "09:20-10:15", "MAT"),
            block(Weekday::Tue, "07:30-08:25", "MAT"),
            block(Weekday::Tue, "08:25-09:20", "MAT"),
        ]);

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].to_string(), "Tue 07:30-10:15 MAT");
    }

    #[test]
    fn blocks_sharing_a_start_merge_the_same_in_any_order() {
        let short = block(Weekday::Mon, "07:30-08:00", "SOP");
        let long = block(Weekday::Mon, "07:30-08:25", "SOP");
        let next = block(Weekday::Mon, "08:25-09:20", "SOP");

        let a = merge_blocks(vec![short.clone(), long.clone(), next.clone()]);
        let b = merge_blocks(vec![long, short, next]);

        assert_eq!(a, b);
        let rendered: Vec<String> = a.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["Mon 07:30-08:00 SOP", "Mon 07:30-09:20 SOP"]);
    }

    #[test]
    fn gap_keeps_sessions_apart() {
        let sessions = merge_blocks(vec![
            block(Weekday::Mon, "07:30-08:25", "SOP"),
            block(Weekday::Mon, "08:40-09:35", "SOP"),
        ]);
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn different_codes_never_merge() {
        let sessions = merge_blocks(vec![
            block(Weekday::Mon, "07:30-08:25", "SOP"),
            block(Weekday::Mon, "08:25-09:20", "MAT"),
        ]);
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn different_weekdays_never_merge() {
        let sessions = merge_blocks(vec![
            block(Weekday::Mon, "07:30-08:25", "SOP"),
            block(Weekday::Wed, "08:25-09:20", "SOP"),
            block(Weekday::Tue, "08:25-09:20", "SOP"),
        ]);
        assert_eq!(sessions.len(), 3);
    }

    #[test]
    fn sessions_are_ordered_monday_first() {
        let sessions = merge_blocks(vec![
            block(Weekday::Sun, "07:30-08:25", "EF"),
            block(Weekday::Fri, "07:30-08:25", "QUI"),
            block(Weekday::Mon, "07:30-08:25", "SOP"),
        ]);
        let days: Vec<Weekday> = sessions.iter().map(|s| s.weekday).collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Fri, Weekday::Sun]);
    }

    #[test]
    fn merging_is_idempotent() {
        let sessions = merge_blocks(vec![
            block(Weekday::Mon, "07:30-08:25", "SOP"),
            block(Weekday::Mon, "08:25-09:20", "SOP"),
            block(Weekday::Mon, "09:40-10:35", "SOP"),
            block(Weekday::Mon, "10:35-11:30", "MAT"),
            block(Weekday::Thu, "13:30-14:25", "FIS"),
            block(Weekday::Thu, "14:25-15:20", "FIS"),
        ]);

        let again = merge_blocks(sessions.iter().cloned().map(Block::from).collect());
        assert_eq!(again, sessions);
        assert_eq!(sessions.len(), 4);
    }

    #[test]
    fn empty_input() {
        assert!(merge_blocks(Vec::new()).is_empty());
    }
}
