//! Terminal rendering for gradecal types.
//!
//! Extension trait adding colored output to gradecal-core types using
//! owo_colors, plus the spinner shown while OCR runs.

use chrono::{Duration, Weekday};
use gradecal_core::{EventPayload, Session, SkippedRow};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Session {
    fn render(&self) -> String {
        format!(
            "{}  {}  {}",
            self.range.to_string().dimmed(),
            self.code.bold(),
            format_duration(self.range.duration()).dimmed()
        )
    }
}

/// "50min", "2h", "1h50"
fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h{:02}", h, m),
    }
}

impl Render for EventPayload {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.summary.bold(),
            self.start.datetime.format("%a %d/%m/%Y %H:%M"),
            format!("-{}", self.end.datetime.format("%H:%M")).dimmed()
        )
    }
}

impl Render for SkippedRow {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            format!("line {}:", self.line_number).dimmed(),
            self.line,
            format!("({})", self.reason).yellow()
        )
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Sessions grouped under a heading per weekday, Monday first.
pub fn render_timetable(sessions: &[Session]) -> String {
    if sessions.is_empty() {
        return "   No classes found".dimmed().to_string();
    }

    let mut lines = Vec::new();
    let mut current: Option<Weekday> = None;

    for session in sessions {
        if current != Some(session.weekday) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(format!("📅 {}", weekday_name(session.weekday).bold()));
            current = Some(session.weekday);
        }
        lines.push(format!("   {}", session.render()));
    }

    lines.join("\n")
}

pub fn render_skipped(skipped: &[SkippedRow]) -> String {
    skipped
        .iter()
        .map(|row| format!("   {}", row.render()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner().tick_strings(&["-", "\\", "|", "/"]);
    if let Ok(style) = style.template("{msg} {spinner}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
