//! Metrics input file.
//!
//! A JSON object holding the subject and its counts, as produced by whatever
//! fetched them:
//!
//! ```json
//! { "login": "octocat", "stars": 120, "followers": 40, "created_at": "2012-01-01T00:00:00Z" }
//! ```
//!
//! A fetcher that failed writes `{ "login": "octocat", "error": "not_found" }`
//! instead.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;
use trophy_common::{FetchFailure, Metrics};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsFile {
    #[serde(default, alias = "subject", alias = "username")]
    pub login: Option<String>,

    /// Collaborator error code, e.g. `not_found` or `rate_limited`
    #[serde(default)]
    pub error: Option<String>,

    /// Account creation time (RFC 3339). Used when no day count is given.
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub metrics: Metrics,
}

impl MetricsFile {
    /// Read from a path, or stdin when the path is `-`.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read metrics from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        };
        Self::parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Invalid metrics JSON")
    }

    /// Split into subject and collaborator outcome, deriving the account age
    /// from `created_at` relative to `now` when needed.
    pub fn into_outcome(self, now: DateTime<Utc>) -> (Option<String>, Result<Metrics, FetchFailure>) {
        if let Some(code) = self.error {
            return (self.login, Err(FetchFailure::from_code(&code)));
        }

        let mut metrics = self.metrics;
        if metrics.account_age_days <= 0.0 {
            if let Some(created) = self.created_at.as_deref() {
                match DateTime::parse_from_rfc3339(created) {
                    Ok(created) => {
                        let days = (now - created.with_timezone(&Utc)).num_days().max(0);
                        metrics.account_age_days = days as f64;
                    }
                    Err(e) => warn!("Ignoring unparseable created_at {:?}: {}", created, e),
                }
            }
        }
        (self.login, Ok(metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_counts() {
        let file = MetricsFile::parse(
            r#"{"login": "octocat", "stars": 120, "prs": 7, "repos": 3, "extra": true}"#,
        )
        .unwrap();
        assert_eq!(file.login.as_deref(), Some("octocat"));
        assert_eq!(file.metrics.stars, 120.0);
        assert_eq!(file.metrics.pull_requests, 7.0);
        assert_eq!(file.metrics.public_repos, 3.0);
    }

    #[test]
    fn test_created_at_to_age() {
        let file =
            MetricsFile::parse(r#"{"login": "octocat", "created_at": "2023-01-01T00:00:00Z"}"#)
                .unwrap();
        let (_, outcome) = file.into_outcome(now());
        assert_eq!(outcome.unwrap().account_age_days, 365.0);
    }

    #[test]
    fn test_explicit_age_wins() {
        let file = MetricsFile::parse(
            r#"{"login": "o", "account_age_days": 10, "created_at": "2000-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let (_, outcome) = file.into_outcome(now());
        assert_eq!(outcome.unwrap().account_age_days, 10.0);
    }

    #[test]
    fn test_error_code() {
        let file = MetricsFile::parse(r#"{"login": "ghost", "error": "rate_limited"}"#).unwrap();
        let (subject, outcome) = file.into_outcome(now());
        assert_eq!(subject.as_deref(), Some("ghost"));
        assert_eq!(outcome, Err(FetchFailure::RateLimited));
    }

    #[test]
    fn test_bad_json() {
        assert!(MetricsFile::parse("{stars: 1").is_err());
    }
}
