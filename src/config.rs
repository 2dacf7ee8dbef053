//! Configuration for folio-core.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the stock behavior.
//!
//! ```ignore
//! let config = FolioConfig::from_json_str(r#"{ "default_language": "pt" }"#)?;
//! let store = PreferenceStore::new(&config, storage, prefers_dark);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::platform::intersection::{ObserverOptions, Threshold};
use crate::types::{Language, ThemeMode};

/// Fixed namespace key of the preference blob.
pub const DEFAULT_STORAGE_KEY: &str = "user-preferences";

/// Duration used for every transition when reduced motion is requested.
pub const REDUCED_MOTION_DURATION: f64 = 0.01;

/// Threshold as written in config: a number or a list of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdConfig {
    Single(f64),
    Multiple(Vec<f64>),
}

impl From<&ThresholdConfig> for Threshold {
    fn from(config: &ThresholdConfig) -> Self {
        match config {
            ThresholdConfig::Single(v) => Threshold::Single(*v),
            ThresholdConfig::Multiple(vs) => Threshold::Multiple(vs.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Storage key of the persisted preference blob.
    pub storage_key: String,
    pub default_theme: ThemeMode,
    pub default_language: Language,
    /// Default threshold for visibility triggers.
    pub observer_threshold: ThresholdConfig,
    /// Default root margin for visibility triggers.
    pub observer_root_margin: String,
    /// Collapsed transition duration under reduced motion, in seconds.
    pub reduced_motion_duration: f64,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_theme: ThemeMode::System,
            default_language: Language::En,
            observer_threshold: ThresholdConfig::Single(0.1),
            observer_root_margin: "0px".to_string(),
            reduced_motion_duration: REDUCED_MOTION_DURATION,
        }
    }
}

impl FolioConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(storage_key = %config.storage_key, "loaded folio config");
        Ok(config)
    }

    /// Observer options for a trigger with no explicit options.
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: Threshold::from(&self.observer_threshold),
            root_margin: self.observer_root_margin.clone(),
            root: None,
        }
    }
}
