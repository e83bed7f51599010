//! Trophyctl - render achievement trophy cards as SVG
//!
//! Reads a subject's metrics from a JSON file and writes the trophy document
//! to stdout. Logs go to stderr; set TROPHY_LOG to change the filter.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trophyctl::commands::{self, RenderArgs};
use trophyctl::config::TrophyConfig;

#[derive(Parser)]
#[command(name = "trophyctl")]
#[command(about = "Trophy Case - achievement cards from contribution metrics", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/trophy/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the trophy document for a metrics file
    Render(RenderArgs),

    /// Print the error document for a failure kind
    Error {
        /// not_found, rate_limited, no_subject, or anything else for a generic fetch error
        kind: String,

        /// Write the SVG here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show tiers, XP and level without rendering
    Inspect {
        /// Metrics JSON file, or `-` for stdin
        metrics: PathBuf,

        /// Variant whose tier scheme to use
        #[arg(long)]
        variant: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TROPHY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = TrophyConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render(args) => commands::render(&config, &args),
        Commands::Error { kind, output } => commands::error(&kind, output.as_deref()),
        Commands::Inspect {
            metrics,
            variant,
            json,
        } => commands::inspect(&config, &metrics, variant.as_deref(), json),
    }
}
