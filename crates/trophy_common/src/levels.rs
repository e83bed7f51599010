//! Level System
//!
//! Aggregates weighted metrics into XP and walks a geometric threshold curve.
//!
//! ## XP Curve
//!
//! Level 1 starts with `base_threshold` XP to clear. Each level cleared multiplies
//! the next threshold by `growth`:
//! - Level 1 -> 2: 100 XP
//! - Level 2 -> 3: 150 XP
//! - Level 3 -> 4: 225 XP
//!
//! Early levels are cheap, later ones increasingly expensive.

use crate::error::TrophyError;
use crate::metrics::{MetricKind, Metrics};
use serde::{Deserialize, Serialize};

/// Title bands mapping level ranges to progression titles
pub const TITLE_BANDS: &[(u32, u32, &str)] = &[
    (1, 4, "Newcomer"),
    (5, 9, "Contributor"),
    (10, 14, "Maintainer"),
    (15, 19, "Core Developer"),
    (20, 29, "Open Source Hero"),
    (30, u32::MAX, "Legend"),
];

/// Get the title for a level
pub fn title_for(level: u32) -> &'static str {
    for &(min, max, title) in TITLE_BANDS {
        if level >= min && level <= max {
            return title;
        }
    }
    "Unknown"
}

/// Per-metric XP weights. XP = sum of metric value times weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpWeights {
    pub stars: f64,
    pub followers: f64,
    pub repositories: f64,
    pub pull_requests: f64,
    pub issues: f64,
    /// Per day of account age
    pub experience: f64,
}

impl Default for XpWeights {
    fn default() -> Self {
        Self {
            stars: 10.0,
            followers: 5.0,
            repositories: 3.0,
            pull_requests: 8.0,
            issues: 4.0,
            experience: 0.5,
        }
    }
}

impl XpWeights {
    pub fn weight(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Stars => self.stars,
            MetricKind::Followers => self.followers,
            MetricKind::Repositories => self.repositories,
            MetricKind::PullRequests => self.pull_requests,
            MetricKind::Issues => self.issues,
            MetricKind::Experience => self.experience,
        }
    }

    /// Total XP for a subject. Never negative.
    pub fn total_xp(&self, metrics: &Metrics) -> f64 {
        let total: f64 = MetricKind::ALL
            .iter()
            .map(|kind| metrics.value(*kind) * self.weight(*kind).max(0.0))
            .sum();
        // Monotonic in every metric, even past overflow
        if total.is_nan() {
            0.0
        } else {
            total.min(f64::MAX)
        }
    }
}

/// Geometric level curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCurve {
    base_threshold: f64,
    growth: f64,
}

/// XP configuration constants
const BASE_THRESHOLD: f64 = 100.0;
const GROWTH_FACTOR: f64 = 1.5;

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base_threshold: BASE_THRESHOLD,
            growth: GROWTH_FACTOR,
        }
    }
}

impl LevelCurve {
    /// `growth` must exceed 1 and `base_threshold` must be positive, or the
    /// leveling loop would never terminate.
    pub fn new(base_threshold: f64, growth: f64) -> Result<Self, TrophyError> {
        if !base_threshold.is_finite() || base_threshold <= 0.0 {
            return Err(TrophyError::InvalidCurve(format!(
                "base threshold must be positive, got {}",
                base_threshold
            )));
        }
        if !growth.is_finite() || growth <= 1.0 {
            return Err(TrophyError::InvalidCurve(format!(
                "growth factor must be greater than 1, got {}",
                growth
            )));
        }
        Ok(Self {
            base_threshold,
            growth,
        })
    }

    pub fn base_threshold(&self) -> f64 {
        self.base_threshold
    }

    pub fn growth(&self) -> f64 {
        self.growth
    }

    /// Derive the level state for a total XP amount.
    pub fn level_for(&self, total_xp: f64) -> LevelState {
        let total_xp = if total_xp.is_finite() && total_xp > 0.0 {
            total_xp
        } else {
            0.0
        };

        let mut level = 1u32;
        let mut remaining = total_xp;
        let mut threshold = self.base_threshold;
        while remaining >= threshold {
            remaining -= threshold;
            level = level.saturating_add(1);
            threshold *= self.growth;
        }

        let progress = (remaining / threshold * 100.0).clamp(0.0, 100.0);
        LevelState {
            level,
            total_xp,
            current_xp: remaining,
            next_level_xp: threshold,
            progress,
        }
    }
}

/// Level derived from one render's XP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelState {
    pub level: u32,
    pub total_xp: f64,
    /// XP into the current level
    pub current_xp: f64,
    /// XP needed to clear the current level
    pub next_level_xp: f64,
    /// Percent of the current level cleared (0-100)
    pub progress: f64,
}

impl LevelState {
    pub fn title(&self) -> &'static str {
        title_for(self.level)
    }

    /// XP still missing for the next level
    pub fn xp_to_next(&self) -> f64 {
        self.next_level_xp - self.current_xp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_zero() {
        let state = LevelCurve::default().level_for(0.0);
        assert_eq!(state.level, 1);
        assert_eq!(state.current_xp, 0.0);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.next_level_xp, 100.0);
    }

    #[test]
    fn test_level_thresholds() {
        let curve = LevelCurve::default();
        assert_eq!(curve.level_for(99.0).level, 1);
        assert_eq!(curve.level_for(100.0).level, 2);
        // 100 + 150
        assert_eq!(curve.level_for(250.0).level, 3);
        assert_eq!(curve.level_for(249.0).level, 2);
    }

    #[test]
    fn test_current_below_next_everywhere() {
        let curve = LevelCurve::default();
        for xp in [0.0, 1.0, 99.9, 100.0, 250.0, 12_345.6, 1e9, 1e15] {
            let state = curve.level_for(xp);
            assert!(
                state.current_xp < state.next_level_xp,
                "xp {} gave {:?}",
                xp,
                state
            );
            assert!(state.progress <= 100.0);
        }
    }

    #[test]
    fn test_progress_midpoint() {
        let state = LevelCurve::default().level_for(175.0);
        assert_eq!(state.level, 2);
        assert!((state.progress - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_curves() {
        assert!(LevelCurve::new(100.0, 1.0).is_err());
        assert!(LevelCurve::new(0.0, 2.0).is_err());
        assert!(LevelCurve::new(f64::NAN, 2.0).is_err());
        assert!(LevelCurve::new(50.0, 2.0).is_ok());
    }

    #[test]
    fn test_total_xp() {
        let metrics = Metrics {
            stars: 10.0,
            followers: 2.0,
            account_age_days: 100.0,
            ..Default::default()
        };
        let xp = XpWeights::default().total_xp(&metrics);
        assert_eq!(xp, 10.0 * 10.0 + 2.0 * 5.0 + 100.0 * 0.5);
        assert_eq!(XpWeights::default().total_xp(&Metrics::default()), 0.0);
    }

    #[test]
    fn test_total_xp_saturates() {
        let big = |stars: f64| {
            XpWeights::default().total_xp(&Metrics {
                stars,
                ..Default::default()
            })
        };
        assert!(big(1e306).is_finite() && big(1e306) > 1e306);
        assert_eq!(big(1e308), f64::MAX);
        assert!(big(1e308) >= big(1e306));

        let state = LevelCurve::default().level_for(big(1e308));
        assert!(state.level > LevelCurve::default().level_for(big(1e306)).level);
        assert!(state.current_xp < state.next_level_xp);
    }

    #[test]
    fn test_xp_to_next() {
        let state = LevelCurve::default().level_for(175.0);
        assert_eq!(state.xp_to_next(), 75.0);
        assert_eq!(LevelCurve::default().level_for(0.0).xp_to_next(), 100.0);
    }

    #[test]
    fn test_title_bands() {
        assert_eq!(title_for(1), "Newcomer");
        assert_eq!(title_for(5), "Contributor");
        assert_eq!(title_for(19), "Core Developer");
        assert_eq!(title_for(500), "Legend");
        assert_eq!(title_for(0), "Unknown");
    }
}
