//! Tier classification.
//!
//! Two tier families exist: letter ranks (`SSS` down to `C`) classified through a
//! [`ThresholdLadder`], and medals (`LEGENDARY` down to `LOCKED`) reached through
//! ascending [`Milestones`]. Both are total: every value maps to exactly one tier.

use crate::error::TrophyError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Sss,
    Ss,
    S,
    Aaa,
    Aa,
    A,
    B,
    C,
    Legendary,
    Gold,
    Silver,
    Bronze,
    Locked,
    Secret,
    Unknown,
}

impl Tier {
    /// Medal tiers in ascending milestone order.
    pub const MEDALS: [Tier; 4] = [Tier::Bronze, Tier::Silver, Tier::Gold, Tier::Legendary];

    /// Parse a tier key. Case-insensitive; anything unrecognized is `Unknown`.
    pub fn parse(key: &str) -> Tier {
        match key.trim().to_uppercase().as_str() {
            "SSS" => Tier::Sss,
            "SS" => Tier::Ss,
            "S" => Tier::S,
            "AAA" => Tier::Aaa,
            "AA" => Tier::Aa,
            "A" => Tier::A,
            "B" => Tier::B,
            "C" => Tier::C,
            "LEGENDARY" => Tier::Legendary,
            "GOLD" => Tier::Gold,
            "SILVER" => Tier::Silver,
            "BRONZE" => Tier::Bronze,
            "LOCKED" => Tier::Locked,
            "SECRET" => Tier::Secret,
            _ => Tier::Unknown,
        }
    }

    /// Configuration key, as accepted by [`Tier::parse`].
    pub fn key(&self) -> &'static str {
        match self {
            Tier::Sss => "SSS",
            Tier::Ss => "SS",
            Tier::S => "S",
            Tier::Aaa => "AAA",
            Tier::Aa => "AA",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::Legendary => "LEGENDARY",
            Tier::Gold => "GOLD",
            Tier::Silver => "SILVER",
            Tier::Bronze => "BRONZE",
            Tier::Locked => "LOCKED",
            Tier::Secret => "SECRET",
            Tier::Unknown => "UNKNOWN",
        }
    }

    /// Rank glyph drawn on the trophy. Medals show their letter equivalent.
    pub fn glyph(&self) -> &'static str {
        match self {
            Tier::Legendary => "SSS",
            Tier::Gold => "S",
            Tier::Silver => "A",
            Tier::Bronze => "B",
            Tier::Locked => "C",
            Tier::Secret | Tier::Unknown => "?",
            letter => letter.key(),
        }
    }

    /// A or better for letters, SILVER or better for medals.
    pub fn is_distinguished(&self) -> bool {
        matches!(
            self,
            Tier::Sss
                | Tier::Ss
                | Tier::S
                | Tier::Aaa
                | Tier::Aa
                | Tier::A
                | Tier::Legendary
                | Tier::Gold
                | Tier::Silver
        )
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ============================================================================
// Threshold ladders
// ============================================================================

/// Ordered `(tier, minimum)` steps, highest minimum first, over a floor tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdLadder {
    steps: Vec<(Tier, f64)>,
    floor: Tier,
}

/// Result of a ladder classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub tier: Tier,
    /// Minimum of the next higher tier; `None` at the top.
    pub next_threshold: Option<f64>,
    pub at_floor: bool,
}

impl ThresholdLadder {
    /// Build a ladder. Minimums must be finite and strictly decreasing.
    pub fn new(steps: Vec<(Tier, f64)>, floor: Tier) -> Result<Self, TrophyError> {
        for (tier, min) in &steps {
            if !min.is_finite() {
                return Err(TrophyError::InvalidLadder(format!(
                    "minimum for {} is not finite",
                    tier
                )));
            }
            if *tier == floor {
                return Err(TrophyError::InvalidLadder(format!(
                    "floor tier {} also appears as a step",
                    floor
                )));
            }
        }
        for pair in steps.windows(2) {
            if pair[1].1 >= pair[0].1 {
                return Err(TrophyError::InvalidLadder(format!(
                    "{} ({}) must be below {} ({})",
                    pair[1].0, pair[1].1, pair[0].0, pair[0].1
                )));
            }
        }
        Ok(Self { steps, floor })
    }

    /// Build a ladder from steps in any order. Non-finite minimums and steps
    /// repeating a minimum or the floor tier are dropped.
    pub fn normalized(mut steps: Vec<(Tier, f64)>, floor: Tier) -> Self {
        steps.retain(|(tier, min)| min.is_finite() && *tier != floor);
        steps.sort_by(|a, b| b.1.total_cmp(&a.1));
        steps.dedup_by(|later, earlier| later.1 == earlier.1);
        Self { steps, floor }
    }

    /// Letter ladder `SSS, SS, S, AAA, AA, A, B` over floor `C`.
    pub fn letters(mins: [f64; 7]) -> Result<Self, TrophyError> {
        let tiers = [Tier::Sss, Tier::Ss, Tier::S, Tier::Aaa, Tier::Aa, Tier::A, Tier::B];
        Self::new(tiers.into_iter().zip(mins).collect(), Tier::C)
    }

    pub fn floor(&self) -> Tier {
        self.floor
    }

    pub fn steps(&self) -> &[(Tier, f64)] {
        &self.steps
    }

    /// Highest tier whose minimum is met. Ties go to the upper tier.
    pub fn classify(&self, value: f64) -> Tier {
        self.classify_with_next(value).tier
    }

    pub fn classify_with_next(&self, value: f64) -> Classification {
        let value = if value.is_nan() { 0.0 } else { value };
        match self.steps.iter().position(|(_, min)| value >= *min) {
            Some(i) => Classification {
                tier: self.steps[i].0,
                next_threshold: i.checked_sub(1).map(|up| self.steps[up].1),
                at_floor: false,
            },
            None => Classification {
                tier: self.floor,
                next_threshold: self.steps.last().map(|(_, min)| *min),
                at_floor: true,
            },
        }
    }
}

// ============================================================================
// Milestones
// ============================================================================

/// Ascending medal minimums: BRONZE, SILVER, GOLD, LEGENDARY (up to four).
#[derive(Debug, Clone, PartialEq)]
pub struct Milestones {
    mins: Vec<f64>,
}

impl Milestones {
    pub fn new(mins: Vec<f64>) -> Result<Self, TrophyError> {
        if mins.is_empty() || mins.len() > Tier::MEDALS.len() {
            return Err(TrophyError::InvalidMilestones(format!(
                "expected 1 to {} milestones, got {}",
                Tier::MEDALS.len(),
                mins.len()
            )));
        }
        if mins.iter().any(|m| !m.is_finite() || *m <= 0.0) {
            return Err(TrophyError::InvalidMilestones(
                "milestones must be finite and positive".to_string(),
            ));
        }
        if mins.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(TrophyError::InvalidMilestones(
                "milestones must be strictly ascending".to_string(),
            ));
        }
        Ok(Self { mins })
    }

    pub fn values(&self) -> &[f64] {
        &self.mins
    }

    /// Highest index whose milestone the value meets.
    pub fn reached(&self, value: f64) -> Option<usize> {
        self.mins.iter().rposition(|min| value >= *min)
    }

    /// Tier for a reached index; `LOCKED` when nothing was reached.
    pub fn tier_at(&self, reached: Option<usize>) -> Tier {
        match reached {
            // The last milestone is always the top medal.
            Some(i) if i + 1 == self.mins.len() => Tier::Legendary,
            Some(i) => Tier::MEDALS[i],
            None => Tier::Locked,
        }
    }

    /// Milestone after `reached`, or `None` at the top.
    pub fn next_after(&self, reached: Option<usize>) -> Option<f64> {
        let next = reached.map_or(0, |i| i + 1);
        self.mins.get(next).copied()
    }
}

// ============================================================================
// Tier styling
// ============================================================================

/// Colors for one tier: label/bar color and trophy fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStyle {
    pub color: String,
    pub trophy: String,
}

impl TierStyle {
    fn new(color: &str, trophy: &str) -> Self {
        Self {
            color: color.to_string(),
            trophy: trophy.to_string(),
        }
    }
}

const LOCKED_COLOR: &str = "#30363d";

fn builtin_style(tier: Tier) -> TierStyle {
    match tier {
        Tier::Sss | Tier::Secret => TierStyle::new("#ff0055", "#ff0055"),
        Tier::Ss | Tier::S => TierStyle::new("#ffb300", "#ffd700"),
        Tier::Aaa | Tier::Aa | Tier::A => TierStyle::new("#0969da", "#0969da"),
        Tier::B => TierStyle::new("#2da44e", "#2da44e"),
        Tier::C => TierStyle::new("#8b949e", "#8b949e"),
        Tier::Legendary => TierStyle::new("#ff4b82", "#ffd700"),
        Tier::Gold => TierStyle::new("#ffb300", "#ffd700"),
        Tier::Silver => TierStyle::new("#a0a0a0", "#a0a0a0"),
        Tier::Bronze => TierStyle::new("#cd7f32", "#cd7f32"),
        Tier::Locked | Tier::Unknown => TierStyle::new(LOCKED_COLOR, LOCKED_COLOR),
    }
}

/// `#rgb`, `#rrggbb` or a bare color name such as `gold`.
pub fn is_plain_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => !color.is_empty() && color.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}

/// Tier color table with optional per-tier overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierStyles {
    overrides: HashMap<Tier, TierStyle>,
}

impl TierStyles {
    /// Build from `tier key -> color` pairs. Unrecognized keys and colors that
    /// are not [`is_plain_color`] are skipped.
    pub fn from_overrides<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut overrides = HashMap::new();
        for (key, color) in pairs {
            let tier = Tier::parse(key);
            if tier == Tier::Unknown {
                warn!("Ignoring color override for unknown tier key {:?}", key);
                continue;
            }
            if !is_plain_color(color) {
                warn!("Ignoring color override {:?} for {}: not a hex or named color", color, tier);
                continue;
            }
            overrides.insert(tier, TierStyle::new(color, color));
        }
        Self { overrides }
    }

    /// Style for a tier. `Unknown` always gets the locked style.
    pub fn style_for(&self, tier: Tier) -> TierStyle {
        if tier == Tier::Unknown {
            return builtin_style(Tier::Locked);
        }
        self.overrides
            .get(&tier)
            .cloned()
            .unwrap_or_else(|| builtin_style(tier))
    }

    /// Style for a raw tier key as found in presentation config.
    pub fn style_for_key(&self, key: &str) -> TierStyle {
        self.style_for(Tier::parse(key))
    }
}
