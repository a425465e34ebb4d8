use anyhow::Result;
use owo_colors::OwoColorize;

use super::{InputArgs, Timetable, WindowArgs};
use crate::config::AppConfig;
use crate::render::{Render, pluralize, render_skipped, render_timetable};

pub async fn run(input: InputArgs, window: WindowArgs, config: AppConfig) -> Result<()> {
    let window = window.given()?;
    let timetable = Timetable::load(&input, &config).await?;

    println!("{}\n", timetable.render_summary().bold());
    println!("{}", render_timetable(&timetable.sessions));

    if let Some(window) = window {
        println!(
            "\n{} {} ({} {})",
            "Between".bold(),
            window,
            window.days(),
            pluralize("day", window.days() as usize)
        );

        let mut total = 0;
        for session in &timetable.sessions {
            let count = session.occurrences(&window).len();
            total += count;
            println!(
                "   {} {}",
                session.render(),
                format!("x{}", count).dimmed()
            );
        }
        println!("   {} {}", total, pluralize("event", total));
    }

    if !timetable.skipped.is_empty() {
        println!(
            "\n{}",
            format!(
                "Skipped {} {}",
                timetable.skipped.len(),
                pluralize("row", timetable.skipped.len())
            )
            .yellow()
        );
        println!("{}", render_skipped(&timetable.skipped));
    }

    Ok(())
}
