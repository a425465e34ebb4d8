//! Core types and algorithms for gradecal.
//!
//! Turns line-oriented recognized text of a weekly class grid into typed
//! blocks, merges back-to-back blocks into sessions and projects each session
//! onto concrete dates as calendar event payloads:
//! - `grid` parses rows and cells into `Block`s
//! - `session` merges blocks into `Session`s
//! - `recurrence` expands a session over a `DateWindow`
//! - `event` materializes occurrences into provider-neutral payloads

pub mod config;
pub mod date_window;
pub mod error;
pub mod event;
pub mod grid;
pub mod ics;
pub mod protocol;
pub mod recurrence;
pub mod session;
pub mod time_range;

pub use config::{ColumnSplit, EventConfig, GridConfig};
pub use date_window::DateWindow;
pub use error::{GradeCalError, GradeCalResult};
pub use event::{EventPayload, EventTemplate, EventTime};
pub use grid::{GridParser, ParseReport, SkippedRow};
pub use recurrence::{Occurrence, Occurrences};
pub use session::{Block, Session, merge_blocks};
pub use time_range::TimeRange;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    #[test]
    fn grid_text_to_event_payloads() {
        let text = "\
Seg Ter Qua
07:30 - 08:25   SOP   ---   SOP
08:25 - 09:20   SOP   MAT   ---
10:00 - 09:00   FIS   FIS   FIS
";
        let parser = GridParser::new(GridConfig::with_columns(vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
        ]))
        .unwrap();

        let report = parser.parse(text);
        assert_eq!(report.rows, 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 4);

        let sessions = merge_blocks(report.blocks);
        let summary: Vec<String> = sessions.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            summary,
            vec![
                "Mon 07:30-09:20 SOP",
                "Tue 08:25-09:20 MAT",
                "Wed 07:30-08:25 SOP",
            ]
        );

        let window = DateWindow::from_args("01/04/2024", "14/04/2024").unwrap();
        let template = EventTemplate::new(&EventConfig::default()).unwrap();

        let payloads: Vec<EventPayload> = sessions
            .iter()
            .flat_map(|s| s.occurrences(&window))
            .map(|o| template.materialize(&o).unwrap())
            .collect();

        assert_eq!(payloads.len(), 6);
        assert_eq!(payloads[0].summary, "SOP");
        assert_eq!(payloads[0].location, "IFSC");
        assert_eq!(payloads[0].start.tzid, "America/Sao_Paulo");
        assert_eq!(
            payloads[1].start.datetime,
            NaiveDate::from_ymd_opt(2024, 4, 8)
                .unwrap()
                .and_hms_opt(7, 30, 0)
                .unwrap()
        );
    }
}
