//! # Config Commands
//!
//! Show the effective configuration, or write it to disk.

use std::path::PathBuf;

use vitrina_sync::AppConfig;

use crate::error::ApiError;

/// Renders the effective configuration (file + environment) as TOML.
pub fn show_config(config: &AppConfig) -> Result<String, ApiError> {
    toml::to_string_pretty(config)
        .map_err(|e| ApiError::internal(format!("Failed to render config: {}", e)))
}

/// Writes the effective configuration to `path`, or the default location.
pub fn save_config(config: &AppConfig, path: Option<PathBuf>) -> Result<(), ApiError> {
    config.save(path)?;
    Ok(())
}
