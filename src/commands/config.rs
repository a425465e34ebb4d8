use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::{AppConfig, config_path, create_default_config};

pub fn run() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        create_default_config(&path)?;
        println!("Created default config at {}\n", path.display());
    }

    let config = AppConfig::load_from(&path)?;

    println!("{}", "Paths".bold());
    println!("  Config:    {}", path.display());

    println!("\n{}", "Settings".bold());
    println!(
        "  Columns:   {}",
        config
            .grid
            .columns
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!("  Timezone:  {}", config.event.timezone);
    println!("  Location:  {}", config.event.location);
    println!("  OCR:       {} -l {}", config.ocr.binary, config.ocr.language);
    println!(
        "  Provider:  gradecal-provider-{} (timeout {})",
        config.provider.name, config.provider.timeout
    );

    Ok(())
}
