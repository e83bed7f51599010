//! Render variants.
//!
//! Every variant runs the same pipeline; a [`VariantProfile`] supplies the
//! constants that differ (card size, grid limits, tier scheme, defaults).

use crate::achievements::TierScheme;
use crate::layout::GridParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Narrow cup cards, six across
    Classic,
    /// Wide icon cards with a subject header
    #[default]
    Tiered,
    /// Letter ranks, up to ten across
    Lettered,
    /// Medal cards under a level/XP header
    Leveled,
    /// Compact letter cards, secrets revealed by default
    HallOfFame,
}

/// What sits in the middle of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardArt {
    Cup,
    Icon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantProfile {
    pub grid: GridParams,
    pub scheme: TierScheme,
    pub art: CardArt,
    pub corner_radius: u32,
    pub animation_step_ms: u32,
    pub show_locked: bool,
    pub show_hidden: bool,
    pub level_header: bool,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Classic,
        Variant::Tiered,
        Variant::Lettered,
        Variant::Leveled,
        Variant::HallOfFame,
    ];

    /// Parse a variant name. Unknown names give the default variant.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "classic" => Variant::Classic,
            "tiered" => Variant::Tiered,
            "lettered" => Variant::Lettered,
            "leveled" | "levelled" => Variant::Leveled,
            "hall-of-fame" | "halloffame" => Variant::HallOfFame,
            _ => Variant::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Tiered => "tiered",
            Variant::Lettered => "lettered",
            Variant::Leveled => "leveled",
            Variant::HallOfFame => "hall-of-fame",
        }
    }

    pub fn profile(&self) -> VariantProfile {
        match self {
            Variant::Classic => VariantProfile {
                grid: GridParams {
                    card_width: 110,
                    card_height: 150,
                    gap: 8,
                    header_height: 40,
                    trailing_margin: 28,
                    default_columns: 6,
                    max_columns: 6,
                },
                scheme: TierScheme::Medals,
                art: CardArt::Cup,
                corner_radius: 6,
                animation_step_ms: 120,
                show_locked: false,
                show_hidden: true,
                level_header: false,
            },
            Variant::Tiered => VariantProfile {
                grid: GridParams {
                    card_width: 130,
                    card_height: 150,
                    gap: 15,
                    header_height: 60,
                    trailing_margin: 28,
                    default_columns: 3,
                    max_columns: 6,
                },
                scheme: TierScheme::Medals,
                art: CardArt::Icon,
                corner_radius: 12,
                animation_step_ms: 100,
                show_locked: true,
                show_hidden: false,
                level_header: false,
            },
            Variant::Lettered => VariantProfile {
                grid: GridParams {
                    card_width: 110,
                    card_height: 130,
                    gap: 10,
                    header_height: 50,
                    trailing_margin: 28,
                    default_columns: 3,
                    max_columns: 10,
                },
                scheme: TierScheme::Letters,
                art: CardArt::Cup,
                corner_radius: 6,
                animation_step_ms: 100,
                show_locked: true,
                show_hidden: false,
                level_header: false,
            },
            Variant::Leveled => VariantProfile {
                grid: GridParams {
                    card_width: 120,
                    card_height: 150,
                    gap: 12,
                    header_height: 96,
                    trailing_margin: 28,
                    default_columns: 3,
                    max_columns: 6,
                },
                scheme: TierScheme::Medals,
                art: CardArt::Cup,
                corner_radius: 8,
                animation_step_ms: 100,
                show_locked: true,
                show_hidden: false,
                level_header: true,
            },
            Variant::HallOfFame => VariantProfile {
                grid: GridParams {
                    card_width: 100,
                    card_height: 130,
                    gap: 10,
                    header_height: 50,
                    trailing_margin: 28,
                    default_columns: 6,
                    max_columns: 10,
                },
                scheme: TierScheme::Letters,
                art: CardArt::Cup,
                corner_radius: 6,
                animation_step_ms: 80,
                show_locked: false,
                show_hidden: true,
                level_header: false,
            },
        }
    }
}
