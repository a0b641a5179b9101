//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default measure settings used when the command line leaves them out.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MeasureConfig {
    /// Color role to resolve (e.g. "ACCENT", "WINDOW", "AERO", "WIN8", "DWM_BLUR_BALANCE").
    /// Names are case-insensitive; run `syscolor --list` for all of them
    #[serde(default = "default_color_type")]
    pub color_type: String,

    /// Channels to print: "ALL", "RED", "GREEN", "BLUE", "ALPHA" or "RGB"
    #[serde(default = "default_display_type")]
    pub display_type: String,

    /// Print channels as two-digit uppercase hex instead of comma separated decimals
    #[serde(default)]
    pub hex: bool,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            color_type: default_color_type(),
            display_type: default_display_type(),
            hex: false,
        }
    }
}

/// Release feed settings for the background version check.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateConfig {
    /// Check for a newer release in the background on startup
    #[serde(default)]
    pub check: bool,

    /// URL of a plain-text file holding the latest version (e.g. "2.1.0")
    #[serde(default = "default_update_url")]
    pub url: String,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            check: false,
            url: default_update_url(),
        }
    }
}

pub(crate) fn default_color_type() -> String {
    crate::measure::DEFAULT_COLOR_TYPE.to_string()
}

pub(crate) fn default_display_type() -> String {
    crate::measure::DEFAULT_DISPLAY_TYPE.to_string()
}

pub(crate) fn default_update_url() -> String {
    crate::update::DEFAULT_RELEASE_FEED.to_string()
}
