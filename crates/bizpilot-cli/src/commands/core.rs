//! Shared command utilities

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use bizpilot_core::{AppConfig, ScenarioPipeline};

/// Load config, applying the `--model` override
pub fn load_config(config_path: Option<&Path>, model_path: Option<&Path>) -> Result<AppConfig> {
    let mut config = AppConfig::load(config_path).context("Failed to load configuration")?;
    if let Some(path) = model_path {
        config.scenario.artifact_path = Some(path.to_path_buf());
    }
    debug!(artifact = %config.scenario.artifact_path().display(), "Configuration loaded");
    Ok(config)
}

/// Build the scenario pipeline for this invocation
pub fn open_pipeline(config: &AppConfig) -> ScenarioPipeline {
    config.scenario.pipeline()
}
