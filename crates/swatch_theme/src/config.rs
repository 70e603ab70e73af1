//! Engine configuration (swatch.toml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::export::DEFAULT_EXPORT_FILENAME;

/// Name of the configuration file looked up in a directory
pub const CONFIG_FILE: &str = "swatch.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Where the theme document is persisted
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the document; in-memory when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Preferred output directory for exported CSS
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: None,
            filename: default_filename(),
        }
    }
}

/// Debounce windows in milliseconds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimingConfig {
    #[serde(default = "default_shade_debounce")]
    pub shade_debounce_ms: u64,
    #[serde(default = "default_shadow_debounce")]
    pub shadow_debounce_ms: u64,
}

fn default_shade_debounce() -> u64 {
    10
}

fn default_shadow_debounce() -> u64 {
    50
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            shade_debounce_ms: default_shade_debounce(),
            shadow_debounce_ms: default_shadow_debounce(),
        }
    }
}

impl TimingConfig {
    pub fn shade_debounce(&self) -> Duration {
        Duration::from_millis(self.shade_debounce_ms)
    }

    pub fn shadow_debounce(&self) -> Duration {
        Duration::from_millis(self.shadow_debounce_ms)
    }
}

impl EngineConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a file, or from `swatch.toml` inside a directory
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            tracing::debug!("no config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(crate::error::StorageError::from)?;
        Self::from_toml(&content)
    }
}
