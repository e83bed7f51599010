//! Caller-supplied render options. Already typed: string parsing happens at
//! the boundary, never here.

use crate::theme::Theme;
use crate::variant::{Variant, VariantProfile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    On,
    Off,
}

impl Animation {
    /// `off` (any case) disables animation; anything else leaves it on.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("off") {
            Self::Off
        } else {
            Self::On
        }
    }

    pub fn is_on(&self) -> bool {
        *self == Self::On
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    pub theme: Theme,
    pub variant: Variant,
    /// Requested column count; `None` uses the variant default
    pub columns: Option<u32>,
    pub animation: Animation,
    /// `None` uses the variant default
    pub show_locked: Option<bool>,
    /// `None` uses the variant default
    pub show_hidden: Option<bool>,
}

impl RenderOptions {
    pub fn show_locked(&self, profile: &VariantProfile) -> bool {
        self.show_locked.unwrap_or(profile.show_locked)
    }

    pub fn show_hidden(&self, profile: &VariantProfile) -> bool {
        self.show_hidden.unwrap_or(profile.show_hidden)
    }
}
