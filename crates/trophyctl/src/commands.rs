//! Command implementations for trophyctl

use crate::config::TrophyConfig;
use crate::flags::{parse_bool_like, parse_columns};
use crate::input::MetricsFile;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use owo_colors::OwoColorize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;
use trophy_common::{
    render_failure, render_outcome, summarize, Animation, FetchFailure, RenderOptions,
    RenderSummary, Theme, Variant,
};

/// Render flags. Anything left unset comes from the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    /// Metrics JSON file, or `-` for stdin
    pub metrics: PathBuf,

    /// Subject name (defaults to `login` from the metrics file)
    #[arg(long, short)]
    pub user: Option<String>,

    /// Color theme: dark or light
    #[arg(long)]
    pub theme: Option<String>,

    /// classic, tiered, lettered, leveled or hall-of-fame
    #[arg(long)]
    pub variant: Option<String>,

    /// Requested column count
    #[arg(long, alias = "column", value_parser = parse_columns)]
    pub columns: Option<u32>,

    /// on or off
    #[arg(long)]
    pub animation: Option<String>,

    /// Show locked trophies
    #[arg(long, alias = "all", value_parser = parse_bool_like)]
    pub show_locked: Option<bool>,

    /// Show secret trophies
    #[arg(long, value_parser = parse_bool_like)]
    pub show_hidden: Option<bool>,

    /// Write the SVG here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    /// Config defaults with these flags laid over them.
    pub fn options(&self, config: &TrophyConfig) -> RenderOptions {
        let base = config.render.options();
        RenderOptions {
            theme: self.theme.as_deref().map(Theme::from_name).unwrap_or(base.theme),
            variant: self
                .variant
                .as_deref()
                .map(Variant::from_name)
                .unwrap_or(base.variant),
            columns: self.columns.or(base.columns),
            animation: self
                .animation
                .as_deref()
                .map(Animation::from_name)
                .unwrap_or(base.animation),
            show_locked: self.show_locked.or(base.show_locked),
            show_hidden: self.show_hidden.or(base.show_hidden),
        }
    }
}

/// Build the document for `args` without writing it anywhere.
pub fn render_document(config: &TrophyConfig, args: &RenderArgs) -> Result<String> {
    let render_config = config.render_config()?;
    let file = MetricsFile::read(&args.metrics)?;
    let (login, outcome) = file.into_outcome(Utc::now());
    let subject = args.user.clone().or(login).map(|s| s.to_lowercase());
    Ok(render_outcome(
        subject.as_deref(),
        outcome,
        &args.options(config),
        &render_config,
    ))
}

pub fn render(config: &TrophyConfig, args: &RenderArgs) -> Result<()> {
    let svg = render_document(config, args)?;
    emit(&svg, args.output.as_deref())
}

/// Print the error document for a collaborator error code.
pub fn error(kind: &str, output: Option<&Path>) -> Result<()> {
    let failure = FetchFailure::from_code(kind);
    info!("Error document for {:?} (status {})", failure, failure.status());
    emit(&render_failure(&failure), output)
}

pub fn inspect(config: &TrophyConfig, metrics: &Path, variant: Option<&str>, json: bool) -> Result<()> {
    let render_config = config.render_config()?;
    let file = MetricsFile::read(metrics)?;
    let (login, outcome) = file.into_outcome(Utc::now());
    let metrics = match outcome {
        Ok(metrics) => metrics,
        Err(failure) => anyhow::bail!("Metrics file reports a failure: {}", failure),
    };
    let variant = variant
        .map(Variant::from_name)
        .unwrap_or(config.render.options().variant);
    let subject = login.unwrap_or_default().to_lowercase();
    let summary = summarize(&subject, &metrics, variant, &render_config);

    if json {
        let out = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", out);
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

/// Human-readable summary table.
pub fn format_summary(summary: &RenderSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} variant)",
        summary.subject.bold(),
        summary.variant.as_str()
    );
    let _ = writeln!(
        out,
        "  Level {} {}  {} / {} XP ({} to next)",
        summary.level.level,
        summary.level.title().cyan(),
        summary.level.current_xp.floor(),
        summary.level.next_level_xp.ceil(),
        summary.level.xp_to_next().ceil()
    );
    for trophy in &summary.catalog {
        let rank = if trophy.is_secret() && !trophy.unlocked {
            "?".to_string()
        } else {
            trophy.tier.to_string()
        };
        let line = format!(
            "  {:<14} {:<10} {:>12}  {:>3.0}%",
            trophy.title,
            rank,
            trophy.display_value(),
            trophy.progress
        );
        if trophy.unlocked {
            let _ = writeln!(out, "{}", line.green());
        } else {
            let _ = writeln!(out, "{}", line.dimmed());
        }
    }
    out
}

fn emit(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", svg),
    }
    Ok(())
}
