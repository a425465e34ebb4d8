mod commands;
mod config;
mod ocr;
mod provider;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::{InputArgs, WindowArgs};
use config::AppConfig;

#[derive(Parser)]
#[command(name = "gradecal")]
#[command(about = "Turn a photo of your weekly class grid into calendar events")]
struct Cli {
    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the classes read from the grid without creating anything
    Preview {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        window: WindowArgs,
    },
    /// Create one calendar event per class per week through a provider
    Import {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        window: WindowArgs,

        /// Print the events instead of creating them
        #[arg(long)]
        dry_run: bool,
    },
    /// Write the events to an .ics file
    Export {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        window: WindowArgs,

        /// Output file (e.g. "aulas.ics")
        #[arg(short, long)]
        output: String,

        /// Calendar name written into the file
        #[arg(long, default_value = "gradecal")]
        name: String,
    },
    /// Show the config file location, creating it if missing
    Config,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Preview { input, window } => {
            commands::preview::run(input, window, AppConfig::load()?).await
        }
        Commands::Import {
            input,
            window,
            dry_run,
        } => commands::import::run(input, window, dry_run, AppConfig::load()?).await,
        Commands::Export {
            input,
            window,
            output,
            name,
        } => commands::export::run(input, window, output, name, AppConfig::load()?).await,
        Commands::Config => commands::config::run(),
    }
}
