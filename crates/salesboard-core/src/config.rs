//! Engine configuration
//!
//! Stored as TOML in `<config dir>/salesboard/config.toml`. Every field has a
//! default, so a partial file only overrides what it names.

use salesboard_types::Granularity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::Palette;
use crate::comparison::BaselineOffset;
use crate::error::{CoreError, INLINE_SOURCE};

/// Tunables of the analytics views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Baseline menu of the live-day view, in days back
    pub live_day_baselines: Vec<BaselineOffset>,
    /// Baseline menu of the month view, in months back
    pub month_baselines: Vec<BaselineOffset>,
    /// Label of the root drill-down crumb
    pub root_crumb_label: String,
    /// Initial sort column of comparison tables
    pub default_sort_key: String,
    /// Choropleth palette (kept last: TOML tables follow plain keys)
    pub palette: Palette,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            live_day_baselines: vec![1, 7, 28],
            month_baselines: vec![1, 12],
            root_crumb_label: "All categories".to_string(),
            default_sort_key: "revenue".to_string(),
            palette: Palette::default(),
        }
    }
}

impl EngineConfig {
    /// Default config location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("salesboard").join("config.toml"))
    }

    /// Load config from `path`.
    /// Returns defaults on any I/O, parse or validation error (graceful degradation).
    pub fn load(path: &Path) -> Self {
        match Self::load_strict(path) {
            Ok(config) => config,
            Err(CoreError::FileNotFound { .. }) => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate config from `path`, reporting every failure
    pub fn load_strict(path: &Path) -> Result<Self, CoreError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            CoreError::TomlParse {
                message, source, ..
            } => CoreError::TomlParse {
                path: path.to_path_buf(),
                message,
                source,
            },
            other => other,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let config: Self = toml::from_str(content).map_err(|e| CoreError::TomlParse {
            path: PathBuf::from(INLINE_SOURCE),
            message: e.message().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, menu) in [
            ("live_day_baselines", &self.live_day_baselines),
            ("month_baselines", &self.month_baselines),
        ] {
            if menu.is_empty() {
                return Err(CoreError::InvalidConfig {
                    message: format!("{} must list at least one offset", name),
                });
            }
            if menu.contains(&0) {
                return Err(CoreError::InvalidConfig {
                    message: format!("{} offsets must be at least 1", name),
                });
            }
        }

        if self.palette.colors.is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "palette.colors must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Baseline menu for a view of the given granularity
    pub fn baselines_for(&self, granularity: Granularity) -> &[BaselineOffset] {
        match granularity {
            Granularity::Hour => &self.live_day_baselines,
            Granularity::Day => &self.month_baselines,
        }
    }
}
