pub mod config;
pub mod export;
pub mod import;
pub mod preview;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use clap::Args;
use dialoguer::Input;
use gradecal_core::date_window::parse_date;
use gradecal_core::{
    DateWindow, EventPayload, EventTemplate, GradeCalError, GradeCalResult, GridParser, Session,
    SkippedRow, merge_blocks,
};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::ocr::Source;
use crate::render::{create_spinner, pluralize};

/// Image read when none is given on the command line
pub const DEFAULT_IMAGE: &str = "horarios.png";

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Photo or screenshot of the class grid
    #[arg(default_value = DEFAULT_IMAGE)]
    pub image: String,

    /// Use already-recognized text instead of running OCR ("-" reads stdin)
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// First day of the term (dd/mm/yyyy)
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of the term, inclusive (dd/mm/yyyy)
    #[arg(long)]
    pub to: Option<String>,
}

impl WindowArgs {
    /// Use the dates given as flags, prompting for any that are missing.
    pub fn resolve(&self) -> Result<DateWindow> {
        let start = match &self.from {
            Some(s) => parse_date(s)?,
            None => prompt_with_retry("  Start date (dd/mm/yyyy)", parse_date)?,
        };

        match &self.to {
            Some(s) => Ok(DateWindow::new(start, parse_date(s)?)?),
            None => prompt_with_retry("  End date (dd/mm/yyyy)", |s| {
                DateWindow::new(start, parse_date(s)?)
            }),
        }
    }

    /// A window only when both dates were given; never prompts.
    pub fn given(&self) -> Result<Option<DateWindow>> {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => Ok(Some(DateWindow::from_args(from, to)?)),
            (None, None) => Ok(None),
            _ => anyhow::bail!("--from and --to must be given together"),
        }
    }
}

/// Prompt until the input parses, showing each error in red.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> GradeCalResult<T>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(input.trim()) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// The merged weekly sessions read from one grid, plus what was dropped on the way.
pub struct Timetable {
    pub sessions: Vec<Session>,
    pub blocks: usize,
    pub rows: usize,
    pub skipped: Vec<SkippedRow>,
}

impl Timetable {
    pub fn from_text(text: &str, config: &AppConfig) -> Result<Self> {
        let parser = GridParser::new(config.grid.clone())?;
        let report = parser.parse(text);
        let blocks = report.blocks.len();
        let sessions = merge_blocks(report.blocks);

        info!(
            rows = report.rows,
            blocks,
            sessions = sessions.len(),
            skipped = report.skipped.len(),
            "timetable parsed"
        );

        Ok(Timetable {
            sessions,
            blocks,
            rows: report.rows,
            skipped: report.skipped,
        })
    }

    pub async fn load(input: &InputArgs, config: &AppConfig) -> Result<Self> {
        let source = Source::from_args(&input.image, input.text.as_deref());

        let text = match &source {
            Source::Image(path) => {
                let spinner = create_spinner(format!("Reading {}", path.display()));
                let result = source.read(&config.ocr).await;
                spinner.finish_and_clear();
                result?
            }
            _ => source.read(&config.ocr).await?,
        };

        Self::from_text(&text, config)
    }

    pub fn render_summary(&self) -> String {
        format!(
            "Found {} {} in {} {} ({} {})",
            self.sessions.len(),
            if self.sessions.len() == 1 { "class" } else { "classes" },
            self.rows,
            pluralize("row", self.rows),
            self.blocks,
            pluralize("block", self.blocks),
        )
    }
}

/// Materialize every occurrence of every session in the window. Occurrences
/// that fall on a nonexistent local time are returned separately.
pub fn materialize_all(
    sessions: &[Session],
    window: &DateWindow,
    template: &EventTemplate,
) -> (Vec<EventPayload>, Vec<GradeCalError>) {
    let mut payloads = Vec::new();
    let mut skipped = Vec::new();

    for session in sessions {
        for occurrence in session.occurrences(window) {
            match template.materialize(&occurrence) {
                Ok(payload) => payloads.push(payload),
                Err(e) => {
                    warn!(session = %session, date = %occurrence.date, "skipping occurrence: {}", e);
                    skipped.push(e);
                }
            }
        }
    }

    (payloads, skipped)
}

/// Set once Ctrl-C is pressed. Long loops check it between steps.
pub fn cancel_on_ctrl_c() -> Arc<AtomicBool> {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            flag.store(true, Ordering::SeqCst);
        }
    });
    cancelled
}
