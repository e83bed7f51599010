//! Achievement trophies built from subject metrics.
//!
//! Six standard trophies (one per metric) plus secret ones that only appear
//! when hidden trophies are revealed.

use crate::metrics::{MetricKind, Metrics};
use crate::tier::{Milestones, ThresholdLadder, Tier};
use serde::{Deserialize, Serialize};

/// How standard trophies pick their tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierScheme {
    /// Letter ranks through threshold ladders
    Letters,
    /// Medals through ascending milestones
    Medals,
}

/// Display category of a trophy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Earned, always shown
    Visible,
    /// Not earned, shown only when locked trophies are requested
    Locked,
    /// Shown only when hidden trophies are revealed, rank obscured
    Secret,
}

/// Presentation metadata for one trophy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub unit: String,
    /// Displayed value is `floor(value / display_divisor)`
    pub display_divisor: f64,
}

impl Presentation {
    pub fn new(id: &str, title: &str, icon: &str, unit: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            icon: icon.to_string(),
            unit: unit.to_string(),
            display_divisor: 1.0,
        }
    }

    pub fn with_divisor(mut self, divisor: f64) -> Self {
        self.display_divisor = divisor;
        self
    }
}

/// A built trophy. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub icon: String,
    /// Raw measured value the tier was classified on
    pub value: f64,
    pub unit: String,
    pub display_divisor: f64,
    pub tier: Tier,
    pub unlocked: bool,
    /// Percent toward the next tier (0-100)
    pub progress: f64,
    pub next_threshold: Option<f64>,
    pub visibility: Visibility,
}

impl Achievement {
    fn from_parts(
        value: f64,
        presentation: &Presentation,
        tier: Tier,
        unlocked: bool,
        progress: f64,
        next_threshold: Option<f64>,
        visibility: Visibility,
    ) -> Self {
        Self {
            id: presentation.id.clone(),
            title: presentation.title.clone(),
            icon: presentation.icon.clone(),
            value,
            unit: presentation.unit.clone(),
            display_divisor: presentation.display_divisor,
            tier,
            unlocked,
            progress,
            next_threshold,
            visibility,
        }
    }

    pub fn is_secret(&self) -> bool {
        self.visibility == Visibility::Secret
    }

    /// Value as shown on the card, e.g. `12 Years` or `340pt`
    pub fn display_value(&self) -> String {
        let divisor = if self.display_divisor > 0.0 {
            self.display_divisor
        } else {
            1.0
        };
        let shown = (self.value / divisor).floor();
        match self.unit.as_str() {
            "" => format!("{}", shown),
            "Pts" => format!("{}pt", shown),
            unit => format!("{} {}", shown, unit),
        }
    }
}

fn clean(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn percent_of(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 100.0;
    }
    (value / target * 100.0).clamp(0.0, 100.0)
}

fn visibility_for(unlocked: bool) -> Visibility {
    if unlocked {
        Visibility::Visible
    } else {
        Visibility::Locked
    }
}

/// Build a trophy whose tier comes from a threshold ladder.
pub fn build_from_ladder(
    value: f64,
    ladder: &ThresholdLadder,
    presentation: &Presentation,
) -> Achievement {
    let value = clean(value);
    let class = ladder.classify_with_next(value);
    let unlocked = !class.at_floor;
    let progress = match class.next_threshold {
        Some(next) => percent_of(value, next),
        None => 100.0,
    };
    Achievement::from_parts(
        value,
        presentation,
        class.tier,
        unlocked,
        progress,
        class.next_threshold,
        visibility_for(unlocked),
    )
}

/// Build a trophy whose tier comes from ascending milestones.
///
/// Progress is fixed at 100 once the top milestone is reached; there is no
/// next value to divide by.
pub fn build_from_milestones(
    value: f64,
    milestones: &Milestones,
    presentation: &Presentation,
) -> Achievement {
    let value = clean(value);
    let reached = milestones.reached(value);
    let next = milestones.next_after(reached);
    let progress = match next {
        Some(next) => percent_of(value, next),
        None => 100.0,
    };
    let unlocked = reached.is_some();
    Achievement::from_parts(
        value,
        presentation,
        milestones.tier_at(reached),
        unlocked,
        progress,
        next,
        visibility_for(unlocked),
    )
}

/// Build a secret trophy earned once `value` reaches `goal`.
pub fn build_secret(value: f64, goal: f64, presentation: &Presentation) -> Achievement {
    let value = clean(value);
    let unlocked = value >= goal;
    let (tier, next) = if unlocked {
        (Tier::Secret, None)
    } else {
        (Tier::Locked, Some(goal))
    };
    Achievement::from_parts(
        value,
        presentation,
        tier,
        unlocked,
        percent_of(value, goal),
        next,
        Visibility::Secret,
    )
}

// ============================================================================
// Standard catalog
// ============================================================================

/// Static definition of a standard trophy
#[derive(Debug, Clone, Copy)]
pub struct TrophyDef {
    pub kind: MetricKind,
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub unit: &'static str,
    pub display_divisor: f64,
    /// Minimums for SSS, SS, S, AAA, AA, A, B
    pub letters: [f64; 7],
    /// Minimums for BRONZE, SILVER, GOLD, LEGENDARY
    pub milestones: [f64; 4],
}

impl TrophyDef {
    pub fn presentation(&self) -> Presentation {
        Presentation::new(self.id, self.title, self.icon, self.unit)
            .with_divisor(self.display_divisor)
    }

    pub fn ladder(&self) -> ThresholdLadder {
        let tiers = [Tier::Sss, Tier::Ss, Tier::S, Tier::Aaa, Tier::Aa, Tier::A, Tier::B];
        ThresholdLadder::normalized(tiers.into_iter().zip(self.letters).collect(), Tier::C)
    }

    pub fn milestones(&self) -> Option<Milestones> {
        Milestones::new(self.milestones.to_vec()).ok()
    }
}

/// All standard trophies, in display order
pub const STANDARD_TROPHIES: [TrophyDef; 6] = [
    TrophyDef {
        kind: MetricKind::Stars,
        id: "stars",
        title: "Stargazer",
        icon: "\u{2b50}",
        unit: "Stars",
        display_divisor: 1.0,
        letters: [2000.0, 500.0, 100.0, 50.0, 25.0, 10.0, 1.0],
        milestones: [1.0, 25.0, 500.0, 2000.0],
    },
    TrophyDef {
        kind: MetricKind::Followers,
        id: "followers",
        title: "Celebrity",
        icon: "\u{1f465}",
        unit: "Followers",
        display_divisor: 1.0,
        letters: [2000.0, 1000.0, 500.0, 200.0, 100.0, 50.0, 10.0],
        milestones: [10.0, 100.0, 500.0, 2000.0],
    },
    TrophyDef {
        kind: MetricKind::Repositories,
        id: "repositories",
        title: "Repo Creator",
        icon: "\u{1f4e6}",
        unit: "Repos",
        display_divisor: 1.0,
        letters: [200.0, 100.0, 50.0, 30.0, 20.0, 10.0, 5.0],
        milestones: [5.0, 20.0, 50.0, 200.0],
    },
    TrophyDef {
        kind: MetricKind::PullRequests,
        id: "pull_requests",
        title: "Pull Shark",
        icon: "\u{1f500}",
        unit: "PRs",
        display_divisor: 1.0,
        letters: [1000.0, 500.0, 100.0, 50.0, 25.0, 10.0, 1.0],
        milestones: [1.0, 25.0, 100.0, 1000.0],
    },
    TrophyDef {
        kind: MetricKind::Issues,
        id: "issues",
        title: "Bug Hunter",
        icon: "\u{1f41b}",
        unit: "Issues",
        display_divisor: 1.0,
        letters: [1000.0, 500.0, 100.0, 50.0, 25.0, 10.0, 1.0],
        milestones: [1.0, 25.0, 100.0, 1000.0],
    },
    TrophyDef {
        kind: MetricKind::Experience,
        id: "experience",
        title: "Veteran",
        icon: "\u{23f3}",
        unit: "Years",
        display_divisor: 365.0,
        letters: [3650.0, 2555.0, 1825.0, 1095.0, 730.0, 365.0, 180.0],
        milestones: [180.0, 730.0, 1825.0, 3650.0],
    },
];

/// Account age in days for the `ancient_user` secret
pub const ANCIENT_USER_DAYS: f64 = 3650.0;

/// Build one standard trophy under the given scheme.
pub fn build_standard(def: &TrophyDef, metrics: &Metrics, scheme: TierScheme) -> Achievement {
    let value = metrics.value(def.kind);
    let presentation = def.presentation();
    match (scheme, def.milestones()) {
        (TierScheme::Medals, Some(milestones)) => {
            build_from_milestones(value, &milestones, &presentation)
        }
        _ => build_from_ladder(value, &def.ladder(), &presentation),
    }
}

/// Build every trophy: the six standard ones in order, then the secrets.
pub fn build_catalog(metrics: &Metrics, scheme: TierScheme) -> Vec<Achievement> {
    let mut catalog: Vec<Achievement> = STANDARD_TROPHIES
        .iter()
        .map(|def| build_standard(def, metrics, scheme))
        .collect();

    let distinguished = catalog.iter().filter(|a| a.tier.is_distinguished()).count();
    catalog.push(build_secret(
        distinguished as f64,
        STANDARD_TROPHIES.len() as f64,
        &Presentation::new("all_rounder", "All-Rounder", "\u{1f3c5}", "Ranks"),
    ));
    catalog.push(build_secret(
        metrics.value(MetricKind::Experience),
        ANCIENT_USER_DAYS,
        &Presentation::new("ancient_user", "Ancient User", "\u{1f5ff}", "Years").with_divisor(365.0),
    ));
    catalog
}

/// Number of standard trophies to fall back to when nothing else would show
pub const DEFAULT_SAMPLE: usize = 3;

/// Pick the trophies to draw, in catalog order.
///
/// Earned trophies always show. Locked ones need `show_locked`, secret ones
/// `show_hidden`. A subject with nothing to show gets the first
/// [`DEFAULT_SAMPLE`] standard trophies instead.
pub fn select_for_display(
    catalog: &[Achievement],
    show_locked: bool,
    show_hidden: bool,
) -> Vec<Achievement> {
    let mut shown: Vec<Achievement> = catalog
        .iter()
        .filter(|a| match a.visibility {
            Visibility::Visible => true,
            Visibility::Locked => show_locked,
            Visibility::Secret => false,
        })
        .cloned()
        .collect();

    if shown.is_empty() {
        shown = catalog
            .iter()
            .filter(|a| !a.is_secret())
            .take(DEFAULT_SAMPLE)
            .cloned()
            .collect();
    }

    if show_hidden {
        shown.extend(catalog.iter().filter(|a| a.is_secret()).cloned());
    }
    shown
}

/// Earned and total trophy counts
pub fn unlocked_count(catalog: &[Achievement]) -> (usize, usize) {
    let earned = catalog.iter().filter(|a| a.unlocked).count();
    (earned, catalog.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stars_def() -> TrophyDef {
        STANDARD_TROPHIES[0]
    }

    #[test]
    fn test_static_tables_valid() {
        for def in STANDARD_TROPHIES.iter() {
            assert!(def.letters.windows(2).all(|w| w[0] > w[1]), "{} letters", def.id);
            let milestones = def.milestones();
            assert!(milestones.is_some(), "{} milestones", def.id);
            assert_eq!(
                milestones.map(|m| m.values().to_vec()),
                Some(def.milestones.to_vec()),
                "{} milestone values",
                def.id
            );
            assert_eq!(def.ladder().steps().len(), 7, "{} ladder", def.id);
        }
    }

    #[test]
    fn test_ladder_build_top_tier() {
        let def = stars_def();
        let a = build_from_ladder(2500.0, &def.ladder(), &def.presentation());
        assert_eq!(a.tier, Tier::Sss);
        assert!(a.unlocked);
        assert_eq!(a.progress, 100.0);
        assert_eq!(a.next_threshold, None);
        assert_eq!(a.visibility, Visibility::Visible);
    }

    #[test]
    fn test_ladder_build_zero_is_locked() {
        let def = stars_def();
        let a = build_from_ladder(0.0, &def.ladder(), &def.presentation());
        assert_eq!(a.tier, Tier::C);
        assert!(!a.unlocked);
        assert_eq!(a.progress, 0.0);
        assert_eq!(a.next_threshold, Some(1.0));
        assert_eq!(a.visibility, Visibility::Locked);
    }

    #[test]
    fn test_ladder_progress_toward_next() {
        let def = stars_def();
        let a = build_from_ladder(50.0, &def.ladder(), &def.presentation());
        assert_eq!(a.tier, Tier::Aaa);
        assert_eq!(a.next_threshold, Some(100.0));
        assert_eq!(a.progress, 50.0);
    }

    #[test]
    fn test_milestone_build() {
        let def = stars_def();
        let m = def.milestones().unwrap();
        let locked = build_from_milestones(0.0, &m, &def.presentation());
        assert_eq!(locked.tier, Tier::Locked);
        assert!(!locked.unlocked);

        let silver = build_from_milestones(100.0, &m, &def.presentation());
        assert_eq!(silver.tier, Tier::Silver);
        assert_eq!(silver.next_threshold, Some(500.0));
        assert_eq!(silver.progress, 20.0);
    }

    #[test]
    fn test_milestone_top_progress_fixed() {
        let def = stars_def();
        let m = def.milestones().unwrap();
        let exact = build_from_milestones(2000.0, &m, &def.presentation());
        assert_eq!(exact.tier, Tier::Legendary);
        assert_eq!(exact.progress, 100.0);
        let beyond = build_from_milestones(9000.0, &m, &def.presentation());
        assert_eq!(beyond.progress, 100.0);
    }

    #[test]
    fn test_missing_value_is_zero() {
        let def = stars_def();
        let a = build_from_ladder(f64::NAN, &def.ladder(), &def.presentation());
        assert_eq!(a.value, 0.0);
        assert!(!a.unlocked);
    }

    #[test]
    fn test_display_value() {
        let metrics = Metrics {
            account_age_days: 800.0,
            ..Default::default()
        };
        let catalog = build_catalog(&metrics, TierScheme::Letters);
        let exp = catalog.iter().find(|a| a.id == "experience").unwrap();
        assert_eq!(exp.display_value(), "2 Years");
        assert_eq!(exp.tier, Tier::Aa);

        let mut pts = exp.clone();
        pts.unit = "Pts".into();
        pts.display_divisor = 1.0;
        assert_eq!(pts.display_value(), "800pt");
    }

    #[test]
    fn test_catalog_order_and_secrets() {
        let catalog = build_catalog(&Metrics::default(), TierScheme::Medals);
        let ids: Vec<_> = catalog.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "stars",
                "followers",
                "repositories",
                "pull_requests",
                "issues",
                "experience",
                "all_rounder",
                "ancient_user"
            ]
        );
        assert!(catalog[6].is_secret());
        assert!(!catalog[6].unlocked);
    }

    #[test]
    fn test_all_rounder_unlocks() {
        let metrics = Metrics {
            stars: 100.0,
            followers: 100.0,
            public_repos: 20.0,
            pull_requests: 100.0,
            issues: 100.0,
            account_age_days: 4000.0,
        };
        let catalog = build_catalog(&metrics, TierScheme::Letters);
        let all = catalog.iter().find(|a| a.id == "all_rounder").unwrap();
        assert!(all.unlocked);
        assert_eq!(all.tier, Tier::Secret);
        let ancient = catalog.iter().find(|a| a.id == "ancient_user").unwrap();
        assert!(ancient.unlocked);
    }

    #[test]
    fn test_select_fallback_sample() {
        let catalog = build_catalog(&Metrics::default(), TierScheme::Letters);
        let shown = select_for_display(&catalog, false, false);
        assert_eq!(shown.len(), DEFAULT_SAMPLE);
        assert!(shown.iter().all(|a| !a.unlocked));
        assert_eq!(shown[0].id, "stars");
    }

    #[test]
    fn test_select_flags() {
        let metrics = Metrics {
            stars: 5.0,
            ..Default::default()
        };
        let catalog = build_catalog(&metrics, TierScheme::Letters);

        let earned = select_for_display(&catalog, false, false);
        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].id, "stars");

        let with_locked = select_for_display(&catalog, true, false);
        assert_eq!(with_locked.len(), 6);

        let with_hidden = select_for_display(&catalog, true, true);
        assert_eq!(with_hidden.len(), 8);
        assert!(with_hidden[6..].iter().all(|a| a.is_secret()));
    }

    #[test]
    fn test_unlocked_count() {
        let metrics = Metrics {
            stars: 5.0,
            followers: 10.0,
            ..Default::default()
        };
        let catalog = build_catalog(&metrics, TierScheme::Letters);
        assert_eq!(unlocked_count(&catalog), (2, 8));
    }
}
