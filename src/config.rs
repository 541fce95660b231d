//! Command-line configuration.
//!
//! Config values are loaded with the following priority (highest to lowest):
//! 1. Command-line flags (applied by the caller)
//! 2. Environment variables (ZENASPECT_*)
//! 3. Config file (~/.config/zenaspect/config.toml)
//! 4. Default values
//!
//! Values stay as text until the run uses them, so a bad entry is reported
//! against the flag or key that supplied it.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: String,
    pub anchor: String,
    pub ratio: String,
    pub background: String,
    pub resize_filter: String,
    pub output_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: "fit".to_string(),
            anchor: "center".to_string(),
            ratio: "16:9".to_string(),
            background: "white".to_string(),
            resize_filter: "triangle".to_string(),
            output_format: "png".to_string(),
        }
    }
}

impl Config {
    /// Load config with priority: env vars > config file > defaults
    pub fn load() -> Self {
        let mut config = Self::load_from_file().unwrap_or_default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zenaspect").join("config.toml"))
    }

    fn load_from_file() -> Option<Self> {
        let path = Self::config_path()?;
        let content = std::fs::read_to_string(&path).ok()?;
        Self::parse(&content)
            .inspect_err(|e| log::warn!("ignoring {}: {e}", path.display()))
            .ok()
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Overlay `ZENASPECT_*` variables looked up through `var`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("ZENASPECT_MODE") {
            self.mode = v;
        }
        if let Some(v) = var("ZENASPECT_ANCHOR") {
            self.anchor = v;
        }
        if let Some(v) = var("ZENASPECT_RATIO") {
            self.ratio = v;
        }
        if let Some(v) = var("ZENASPECT_BACKGROUND") {
            self.background = v;
        }
        if let Some(v) = var("ZENASPECT_RESIZE_FILTER") {
            self.resize_filter = v;
        }
        if let Some(v) = var("ZENASPECT_OUTPUT_FORMAT") {
            self.output_format = v;
        }
    }
}
