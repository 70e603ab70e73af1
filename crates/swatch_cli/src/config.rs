//! Configuration resolution for the CLI

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use swatch_theme::config::CONFIG_FILE;
use swatch_theme::EngineConfig;

/// Store used when neither the config nor the command line names one
pub const DEFAULT_STORE: &str = ".swatch";

/// Load `swatch.toml` and apply command-line overrides
pub fn resolve(config: Option<&Path>, store: Option<PathBuf>) -> Result<EngineConfig> {
    let path = config.unwrap_or_else(|| Path::new(CONFIG_FILE));
    let mut engine = EngineConfig::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    if let Some(store) = store {
        engine.storage.path = Some(store);
    } else if engine.storage.path.is_none() {
        engine.storage.path = Some(PathBuf::from(DEFAULT_STORE));
    }

    tracing::debug!(
        "storage at {}",
        engine
            .storage
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    );
    Ok(engine)
}

/// Serialize the effective configuration
pub fn to_toml(config: &EngineConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}
