use anyhow::{Context, Result};
use gradecal_core::EventTemplate;
use gradecal_core::ics::generate_ics;
use owo_colors::OwoColorize;

use super::{InputArgs, Timetable, WindowArgs, materialize_all};
use crate::config::{AppConfig, expand_path};
use crate::render::pluralize;

pub async fn run(
    input: InputArgs,
    window: WindowArgs,
    output: String,
    name: String,
    config: AppConfig,
) -> Result<()> {
    let timetable = Timetable::load(&input, &config).await?;
    println!("{}", timetable.render_summary().bold());

    let window = window.resolve()?;
    let template = EventTemplate::new(&config.event)?;

    let (payloads, skipped) = materialize_all(&timetable.sessions, &window, &template);
    for e in &skipped {
        println!("   {} {}", "!".yellow(), e.to_string().yellow());
    }

    let ics = generate_ics(&name, &payloads)?;
    let path = expand_path(&output);
    std::fs::write(&path, ics)
        .with_context(|| format!("Failed to write calendar file at {}", path.display()))?;

    println!(
        "\nWrote {} {} to {}",
        payloads.len(),
        pluralize("event", payloads.len()),
        path.display()
    );

    Ok(())
}
