//! Error types for the trophy core.
//!
//! `TrophyError` covers invalid static configuration (ladders, milestones, curves).
//! `FetchFailure` is the taxonomy of collaborator failures that end a request
//! with an error document.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrophyError {
    #[error("Invalid threshold ladder: {0}")]
    InvalidLadder(String),

    #[error("Invalid milestones: {0}")]
    InvalidMilestones(String),

    #[error("Invalid level curve: {0}")]
    InvalidCurve(String),
}

impl TrophyError {
    pub fn code(&self) -> i32 {
        match self {
            TrophyError::InvalidLadder(_) => -33001,
            TrophyError::InvalidMilestones(_) => -33002,
            TrophyError::InvalidCurve(_) => -33003,
        }
    }
}

/// Terminal failure reported before any metrics reach the core.
///
/// None of these are retried here; the display text is what ends up in the
/// error document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("Username is required")]
    NoSubject,

    #[error("User not found")]
    NotFound,

    #[error("Rate limit exceeded")]
    RateLimited,

    /// Any other collaborator failure. The detail is logged, never rendered.
    #[error("Failed to fetch stats")]
    Fetch(String),
}

impl FetchFailure {
    /// HTTP-style status a front end should answer with.
    pub fn status(&self) -> u16 {
        match self {
            FetchFailure::NoSubject => 400,
            FetchFailure::NotFound => 404,
            FetchFailure::RateLimited => 403,
            FetchFailure::Fetch(_) => 500,
        }
    }

    /// Map a collaborator error code (`not_found`, `rate_limited`, ...) to a failure.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().replace('-', "_").as_str() {
            "no_subject" | "missing_subject" => FetchFailure::NoSubject,
            "not_found" | "user_not_found" => FetchFailure::NotFound,
            "rate_limited" | "rate_limit" => FetchFailure::RateLimited,
            other => FetchFailure::Fetch(other.to_string()),
        }
    }
}
