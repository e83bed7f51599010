//! Trophy configuration
//!
//! Config file: ~/.config/trophy/config.toml or /etc/trophy/config.toml
//!
//! ```toml
//! [render]
//! theme = "light"
//! variant = "leveled"
//! columns = 4
//!
//! [xp]
//! base_threshold = 100.0
//! growth = 1.5
//!
//! [xp.weights]
//! stars = 10.0
//!
//! [colors]
//! GOLD = "#e3b341"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use trophy_common::{
    Animation, LevelCurve, RenderConfig, RenderOptions, Theme, TierStyles, Variant, XpWeights,
};

/// Default render options. Names are parsed leniently: unknown values fall
/// back to the built-in default instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderSection {
    #[serde(default)]
    pub theme: Option<String>,

    #[serde(default)]
    pub variant: Option<String>,

    #[serde(default)]
    pub columns: Option<u32>,

    /// `on` or `off`
    #[serde(default)]
    pub animation: Option<String>,

    #[serde(default)]
    pub show_locked: Option<bool>,

    #[serde(default)]
    pub show_hidden: Option<bool>,
}

impl RenderSection {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            theme: self.theme.as_deref().map(Theme::from_name).unwrap_or_default(),
            variant: self
                .variant
                .as_deref()
                .map(Variant::from_name)
                .unwrap_or_default(),
            columns: self.columns,
            animation: self
                .animation
                .as_deref()
                .map(Animation::from_name)
                .unwrap_or_default(),
            show_locked: self.show_locked,
            show_hidden: self.show_hidden,
        }
    }
}

/// XP weights and level curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpSection {
    #[serde(default)]
    pub weights: XpWeights,

    #[serde(default = "default_base_threshold")]
    pub base_threshold: f64,

    #[serde(default = "default_growth")]
    pub growth: f64,
}

fn default_base_threshold() -> f64 {
    LevelCurve::default().base_threshold()
}

fn default_growth() -> f64 {
    LevelCurve::default().growth()
}

impl Default for XpSection {
    fn default() -> Self {
        Self {
            weights: XpWeights::default(),
            base_threshold: default_base_threshold(),
            growth: default_growth(),
        }
    }
}

/// Main trophy configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrophyConfig {
    #[serde(default)]
    pub render: RenderSection,

    #[serde(default)]
    pub xp: XpSection,

    /// Tier key to color overrides, e.g. `SSS = "#ff0055"`
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl TrophyConfig {
    /// User config path: ~/.config/trophy/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trophy").join("config.toml"))
    }

    /// System config path: /etc/trophy/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/trophy/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. User config (~/.config/trophy/config.toml)
    /// 3. System config (/etc/trophy/config.toml)
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::load_from(&system_path);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: TrophyConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Tables for the render pipeline. Fails on an unusable level curve.
    pub fn render_config(&self) -> Result<RenderConfig> {
        let curve = LevelCurve::new(self.xp.base_threshold, self.xp.growth)
            .context("Invalid [xp] level curve")?;
        let styles = TierStyles::from_overrides(
            self.colors
                .iter()
                .map(|(key, color)| (key.as_str(), color.as_str())),
        );
        Ok(RenderConfig {
            weights: self.xp.weights,
            curve,
            styles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrophyConfig::default();
        assert_eq!(config.render.options(), RenderOptions::default());
        assert_eq!(config.render_config().unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: TrophyConfig = toml::from_str(
            r#"
            [render]
            theme = "LIGHT"
            variant = "nonsense"
            animation = "off"

            [xp.weights]
            stars = 1.0
            "#,
        )
        .unwrap();

        let opts = config.render.options();
        assert_eq!(opts.theme, Theme::Light);
        assert_eq!(opts.variant, Variant::default());
        assert_eq!(opts.animation, Animation::Off);
        assert_eq!(config.xp.weights.stars, 1.0);
        assert_eq!(config.xp.weights.followers, XpWeights::default().followers);
        assert_eq!(config.xp.growth, 1.5);
    }

    #[test]
    fn test_bad_curve_rejected() {
        let mut config = TrophyConfig::default();
        config.xp.growth = 1.0;
        let err = config.render_config().unwrap_err();
        assert!(format!("{:#}", err).contains("growth factor"));
    }
}
