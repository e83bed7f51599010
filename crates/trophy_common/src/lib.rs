//! Shared rendering core for trophy cards.
//!
//! Turns a subject's raw metrics into a grid of achievement cards encoded as a
//! single SVG document. Every call is a pure function of its inputs.

pub mod achievements;
pub mod card;
pub mod document;
pub mod error;
pub mod layout;
pub mod levels;
pub mod metrics;
pub mod options;
pub mod pipeline;
pub mod svg;
pub mod theme;
pub mod tier;
pub mod variant;

pub use achievements::{Achievement, Presentation, TierScheme, Visibility};
pub use document::{compose, compose_error, sanitize_message, DocumentBuilder, Fragment};
pub use error::{FetchFailure, TrophyError};
pub use layout::{layout, CardPosition, GridParams, LayoutSpec};
pub use levels::{LevelCurve, LevelState, XpWeights};
pub use metrics::{MetricKind, Metrics};
pub use options::{Animation, RenderOptions};
pub use pipeline::{render, render_failure, render_outcome, summarize, RenderConfig, RenderSummary};
pub use theme::{Palette, Theme};
pub use tier::{Milestones, ThresholdLadder, Tier, TierStyles};
pub use variant::{Variant, VariantProfile};
