use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use gradecal_core::{DateWindow, EventTemplate, Session};
use owo_colors::OwoColorize;
use tracing::{error, info, warn};

use super::{InputArgs, Timetable, WindowArgs, cancel_on_ctrl_c};
use crate::config::AppConfig;
use crate::provider::Provider;
use crate::render::{Render, pluralize};

#[derive(Debug, Default)]
struct ImportStats {
    created: usize,
    skipped: usize,
    interrupted: bool,
}

pub async fn run(
    input: InputArgs,
    window: WindowArgs,
    dry_run: bool,
    config: AppConfig,
) -> Result<()> {
    let timetable = Timetable::load(&input, &config).await?;
    println!("{}", timetable.render_summary().bold());

    if timetable.sessions.is_empty() {
        anyhow::bail!(
            "No classes found in the grid.\n\
            Check the recognized text with:\n  \
            gradecal preview {}",
            input.image
        );
    }

    let window = window.resolve()?;
    let template = EventTemplate::new(&config.event)?;

    // Resolve the provider before the first write so a missing binary fails fast
    let provider = if dry_run {
        None
    } else {
        Some(Provider::new(&config.provider)?)
    };

    match &provider {
        Some(provider) => println!("\n📅 Importing into {} ({})", provider.name(), window),
        None => println!("\n📅 Dry run ({})", window),
    }

    let cancelled = cancel_on_ctrl_c();
    let stats = import_sessions(
        &timetable.sessions,
        &window,
        &template,
        provider.as_ref(),
        &cancelled,
    )
    .await?;

    let verb = if dry_run { "Would create" } else { "Created" };
    println!(
        "\n{} {} {}",
        verb,
        stats.created,
        pluralize("event", stats.created)
    );
    if stats.skipped > 0 {
        println!(
            "{}",
            format!(
                "Skipped {} {} that fall on a nonexistent local time",
                stats.skipped,
                pluralize("occurrence", stats.skipped)
            )
            .yellow()
        );
    }

    if stats.interrupted {
        anyhow::bail!(
            "Interrupted after {} {}",
            stats.created,
            pluralize("event", stats.created)
        );
    }

    Ok(())
}

/// Send every occurrence to the provider, or print it when there is none.
/// `cancelled` is checked before each occurrence.
async fn import_sessions(
    sessions: &[Session],
    window: &DateWindow,
    template: &EventTemplate,
    provider: Option<&Provider>,
    cancelled: &AtomicBool,
) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    for session in sessions {
        for occurrence in session.occurrences(window) {
            if cancelled.load(Ordering::SeqCst) {
                println!("{}", "   Interrupted".yellow());
                stats.interrupted = true;
                return Ok(stats);
            }

            let payload = match template.materialize(&occurrence) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(session = %session, date = %occurrence.date, "skipping occurrence: {}", e);
                    println!("   {} {}", "!".yellow(), e.to_string().yellow());
                    stats.skipped += 1;
                    continue;
                }
            };

            let line = payload.render();
            match provider {
                Some(provider) => {
                    let created = provider
                        .create_event(payload)
                        .await
                        .inspect_err(|e| {
                            error!(provider = provider.name(), "create_event failed: {}", e)
                        })
                        .with_context(|| format!("Failed to create {}", line))?;
                    info!(id = %created.id, "created event");
                    println!("   {} {}", "+".green(), line);
                }
                None => println!("   {} {}", "~".dimmed(), line),
            }
            stats.created += 1;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradecal_core::EventConfig;

    fn timetable() -> Timetable {
        Timetable::from_text(
            "07:30 - 08:25  ---  SOP  MAT  ---  ---  ---  ---\n",
            &AppConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn dry_run_counts_every_occurrence() {
        let window = DateWindow::from_args("01/04/2024", "28/04/2024").unwrap();
        let template = EventTemplate::new(&EventConfig::default()).unwrap();
        let cancelled = AtomicBool::new(false);

        let stats = import_sessions(&timetable().sessions, &window, &template, None, &cancelled)
            .await
            .unwrap();

        assert_eq!(stats.created, 8);
        assert_eq!(stats.skipped, 0);
        assert!(!stats.interrupted);
    }

    #[tokio::test]
    async fn cancellation_stops_before_the_next_occurrence() {
        let window = DateWindow::from_args("01/04/2024", "28/04/2024").unwrap();
        let template = EventTemplate::new(&EventConfig::default()).unwrap();
        let cancelled = AtomicBool::new(true);

        let stats = import_sessions(&timetable().sessions, &window, &template, None, &cancelled)
            .await
            .unwrap();

        assert_eq!(stats.created, 0);
        assert!(stats.interrupted);
    }
}
