//! Configuration file support for syscolor.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `<config dir>/syscolor/config.toml`. Settings include the default measure
//! (color type, display type, hex) and the background version check.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

pub use types::{MeasureConfig, UpdateConfig};

use crate::color::{ColorRole, DisplayType};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [measure]
/// color_type = "accent"
/// display_type = "rgb"
/// hex = true
///
/// [updates]
/// check = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Default measure settings
    #[serde(default)]
    pub measure: MeasureConfig,

    /// Background version check
    #[serde(default)]
    pub updates: UpdateConfig,
}

impl Config {
    /// Replaces values that would never resolve with their defaults.
    ///
    /// Unknown color/display names and malformed feed URLs are logged and
    /// reset, so a typo in the file does not turn every run into "no value".
    fn validate(&mut self) {
        if ColorRole::from_name(&self.measure.color_type).is_none() {
            warn!(
                "Invalid color_type '{}', falling back to '{}'",
                self.measure.color_type,
                types::default_color_type()
            );
            self.measure.color_type = types::default_color_type();
        }

        if DisplayType::from_name(&self.measure.display_type).is_none() {
            warn!(
                "Invalid display_type '{}', falling back to '{}'",
                self.measure.display_type,
                types::default_display_type()
            );
            self.measure.display_type = types::default_display_type();
        }

        let url_ok = url::Url::parse(&self.updates.url)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
        if !url_ok {
            warn!(
                "Invalid updates.url '{}', falling back to the default feed",
                self.updates.url
            );
            self.updates.url = types::default_update_url();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("syscolor");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the documented example config to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a file already exists there or it cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
