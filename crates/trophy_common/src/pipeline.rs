//! End-to-end render: metrics in, SVG document out.
//!
//! metrics -> tiers -> trophies -> (level) -> layout -> cards -> document.
//! Any failure before metrics arrive goes straight to the error document.

use crate::achievements::{build_catalog, select_for_display, unlocked_count, Achievement};
use crate::document::{compose, compose_error, sanitize_message, ComposeParams, DocumentHeader};
use crate::error::FetchFailure;
use crate::levels::{LevelCurve, LevelState, XpWeights};
use crate::metrics::Metrics;
use crate::options::RenderOptions;
use crate::tier::TierStyles;
use crate::variant::Variant;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Immutable tables the pipeline is built with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderConfig {
    pub weights: XpWeights,
    pub curve: LevelCurve,
    pub styles: TierStyles,
}

/// Everything computed for a subject, without drawing it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    pub subject: String,
    pub variant: Variant,
    pub catalog: Vec<Achievement>,
    pub level: LevelState,
}

/// Compute trophies and level for a subject.
pub fn summarize(
    subject: &str,
    metrics: &Metrics,
    variant: Variant,
    config: &RenderConfig,
) -> RenderSummary {
    let profile = variant.profile();
    let total_xp = config.weights.total_xp(metrics);
    RenderSummary {
        subject: subject.to_string(),
        variant,
        catalog: build_catalog(metrics, profile.scheme),
        level: config.curve.level_for(total_xp),
    }
}

/// Render the trophy document for one subject.
pub fn render(
    subject: &str,
    metrics: &Metrics,
    options: &RenderOptions,
    config: &RenderConfig,
) -> String {
    let profile = options.variant.profile();
    let catalog = build_catalog(metrics, profile.scheme);
    let (earned, total) = unlocked_count(&catalog);
    let shown = select_for_display(
        &catalog,
        options.show_locked(&profile),
        options.show_hidden(&profile),
    );

    let level = if profile.level_header {
        let state = config.curve.level_for(config.weights.total_xp(metrics));
        debug!("{} is level {} ({} XP)", subject, state.level, state.total_xp);
        Some(state)
    } else {
        None
    };

    info!(
        "Rendering {} trophies for {} ({} variant, {} earned)",
        shown.len(),
        subject,
        options.variant.as_str(),
        earned
    );

    let header = DocumentHeader {
        subject: subject.to_string(),
        level,
        earned,
        total,
    };
    let params = ComposeParams {
        profile: &profile,
        styles: &config.styles,
        columns: options.columns,
        animation: options.animation,
    };
    compose(&shown, &header, &options.theme.palette(), &params)
}

/// Render whatever the metrics collaborator produced.
///
/// A missing or blank subject is reported without looking at the outcome.
pub fn render_outcome(
    subject: Option<&str>,
    outcome: Result<Metrics, FetchFailure>,
    options: &RenderOptions,
    config: &RenderConfig,
) -> String {
    let subject = match subject.map(str::trim).filter(|s| !s.is_empty()) {
        Some(subject) => subject,
        None => return render_failure(&FetchFailure::NoSubject),
    };
    match outcome {
        Ok(metrics) => render(subject, &metrics, options, config),
        Err(failure) => render_failure(&failure),
    }
}

/// Error document for a collaborator failure.
pub fn render_failure(failure: &FetchFailure) -> String {
    match failure {
        FetchFailure::Fetch(detail) => warn!("Metrics fetch failed: {}", detail),
        other => debug!("Rendering error document: {}", other),
    }
    compose_error(&sanitize_message(&failure.to_string()))
}
