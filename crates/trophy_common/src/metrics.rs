//! Normalized subject metrics.
//!
//! The collaborator may zero-default any field it failed to fetch; the core
//! cannot tell the difference and does not try to.

use serde::{Deserialize, Serialize};

/// Raw counts for one subject. Missing fields deserialize as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub stars: f64,
    pub followers: f64,
    #[serde(alias = "repos")]
    pub public_repos: f64,
    #[serde(alias = "prs")]
    pub pull_requests: f64,
    pub issues: f64,
    #[serde(alias = "age_days", alias = "ageDays")]
    pub account_age_days: f64,
}

impl Metrics {
    /// Read one metric. Negative, NaN and infinite values read as 0.
    pub fn value(&self, kind: MetricKind) -> f64 {
        let raw = match kind {
            MetricKind::Stars => self.stars,
            MetricKind::Followers => self.followers,
            MetricKind::Repositories => self.public_repos,
            MetricKind::PullRequests => self.pull_requests,
            MetricKind::Issues => self.issues,
            MetricKind::Experience => self.account_age_days,
        };
        if raw.is_finite() && raw > 0.0 {
            raw
        } else {
            0.0
        }
    }
}

/// The six standard measurements, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Stars,
    Followers,
    Repositories,
    PullRequests,
    Issues,
    Experience,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Stars,
        MetricKind::Followers,
        MetricKind::Repositories,
        MetricKind::PullRequests,
        MetricKind::Issues,
        MetricKind::Experience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Stars => "stars",
            MetricKind::Followers => "followers",
            MetricKind::Repositories => "repositories",
            MetricKind::PullRequests => "pull_requests",
            MetricKind::Issues => "issues",
            MetricKind::Experience => "experience",
        }
    }
}
