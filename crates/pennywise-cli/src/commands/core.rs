//! Shared command utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pennywise_core::{AppConfig, OracleHandle};

/// Resolve configuration from an explicit path or the default locations
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(path).context("Failed to load configuration")
}

/// Model path to use: the command-line override, else the configured one
pub fn model_path(config: &AppConfig, model: Option<&Path>) -> PathBuf {
    model
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.oracle.model_path.clone())
}

/// Load the oracle if its bundle is present and valid
pub fn open_oracle(config: &AppConfig, model: Option<&Path>) -> (PathBuf, OracleHandle) {
    let path = model_path(config, model);
    let oracle = OracleHandle::load_optional(&path);
    (path, oracle)
}
