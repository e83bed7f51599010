//! Color themes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// `dark` or `light`, case-insensitive. Anything else is `Dark`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Self::Dark => DARK,
            Self::Light => LIGHT,
        }
    }
}

/// Concrete colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub card_background: &'static str,
    pub text_title: &'static str,
    pub text_sub: &'static str,
    pub stroke: &'static str,
    pub accent: &'static str,
    /// Empty progress track
    pub track: &'static str,
    /// Rank glyph drawn over the trophy fill
    pub rank_text: &'static str,
}

pub const DARK: Palette = Palette {
    background: "#0d1117",
    card_background: "#161b22",
    text_title: "#c9d1d9",
    text_sub: "#8b949e",
    stroke: "#444c56",
    accent: "#58a6ff",
    track: "#30363d",
    rank_text: "#000",
};

pub const LIGHT: Palette = Palette {
    background: "#ffffff",
    card_background: "#f6f8fa",
    text_title: "#24292f",
    text_sub: "#57606a",
    stroke: "#d0d7de",
    accent: "#0969da",
    track: "#e1e4e8",
    rank_text: "#fff",
};

/// Resolve a theme name straight to its palette.
pub fn resolve(name: &str) -> Palette {
    Theme::from_name(name).palette()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_themes() {
        assert_eq!(resolve("dark"), DARK);
        assert_eq!(resolve("light"), LIGHT);
        assert_eq!(resolve(" Light "), LIGHT);
    }

    #[test]
    fn test_unknown_falls_back_to_dark() {
        assert_eq!(resolve("solarized"), DARK);
        assert_eq!(resolve(""), DARK);
        assert_eq!(Theme::from_name("neon"), Theme::Dark);
    }
}
