//! Application configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path (`--config`), or the override in the data dir
//!    (~/.local/share/bizpilot/config/bizpilot.toml) when it exists
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override file keep their default values. An override
//! that defines `[compliance.industries]` replaces the whole default catalog.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::compliance::ComplianceCatalog;
use crate::error::{Error, Result};
use crate::generator::GeneratorConfig;
use crate::scenario::{default_artifact_path, ForestParams, ModelStore, ScenarioPipeline};
use crate::workflow::WorkflowConfig;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/bizpilot.toml");

/// Scenario model settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioConfig {
    pub forest: ForestParams,
    /// Artifact location, `None` means the platform data dir
    pub artifact_path: Option<PathBuf>,
}

impl ScenarioConfig {
    pub fn artifact_path(&self) -> PathBuf {
        self.artifact_path
            .clone()
            .unwrap_or_else(default_artifact_path)
    }

    /// Pipeline over the configured artifact and forest settings
    pub fn pipeline(&self) -> ScenarioPipeline {
        ScenarioPipeline::new(ModelStore::new(self.artifact_path()), self.forest)
    }
}

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub scenario: ScenarioConfig,
    pub workflow: WorkflowConfig,
    pub compliance: ComplianceCatalog,
}

impl AppConfig {
    /// Load from an explicit path, the data-dir override, or the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::InvalidData(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                ))
            })?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => {
                    debug!("Using config override: {}", path.display());
                    fs::read_to_string(&path)
                        .map_err(|e| Error::InvalidData(format!("Failed to read config: {}", e)))?
                }
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("bizpilot").join("config").join("bizpilot.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    generator: Option<RawGenerator>,
    scenario: Option<RawScenario>,
    workflow: Option<RawWorkflow>,
    compliance: Option<RawCompliance>,
}

#[derive(Debug, Deserialize)]
struct RawGenerator {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    seed: Option<u64>,
    revenue_min: Option<f64>,
    revenue_max: Option<f64>,
    expenses_min: Option<f64>,
    expenses_max: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    n_trees: Option<usize>,
    seed: Option<u64>,
    artifact_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawWorkflow {
    inefficiency_score: Option<f64>,
    threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCompliance {
    default_industry: Option<String>,
    industries: Option<BTreeMap<String, RawIndustry>>,
}

#[derive(Debug, Deserialize)]
struct RawIndustry {
    regulations: Vec<String>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid config TOML: {}", e)))?;

    let mut config = AppConfig::default();

    if let Some(generator) = raw.generator {
        let g = &mut config.generator;
        if let Some(start) = generator.start {
            g.start = start;
        }
        if let Some(end) = generator.end {
            g.end = end;
        }
        if let Some(seed) = generator.seed {
            g.seed = seed;
        }
        if let Some(v) = generator.revenue_min {
            g.revenue_range.0 = v;
        }
        if let Some(v) = generator.revenue_max {
            g.revenue_range.1 = v;
        }
        if let Some(v) = generator.expenses_min {
            g.expense_range.0 = v;
        }
        if let Some(v) = generator.expenses_max {
            g.expense_range.1 = v;
        }
    }

    if let Some(scenario) = raw.scenario {
        if let Some(n_trees) = scenario.n_trees {
            config.scenario.forest.n_trees = n_trees;
        }
        if let Some(seed) = scenario.seed {
            config.scenario.forest.seed = seed;
        }
        config.scenario.artifact_path = scenario.artifact_path;
    }

    if let Some(workflow) = raw.workflow {
        if let Some(score) = workflow.inefficiency_score {
            config.workflow.inefficiency_score = score;
        }
        if let Some(threshold) = workflow.threshold {
            config.workflow.threshold = threshold;
        }
    }

    if let Some(compliance) = raw.compliance {
        let default_industry = compliance
            .default_industry
            .unwrap_or_else(|| config.compliance.default_industry().to_string());
        let industries = match compliance.industries {
            Some(industries) => industries
                .into_iter()
                .map(|(k, v)| (k, v.regulations))
                .collect(),
            None => config
                .compliance
                .industries()
                .filter_map(|k| {
                    config
                        .compliance
                        .regulations(k)
                        .map(|r| (k.to_string(), r.to_vec()))
                })
                .collect(),
        };
        config.compliance = ComplianceCatalog::new(industries, default_industry)?;
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<()> {
    let g = &config.generator;
    if g.start > g.end {
        return Err(Error::InvalidData(format!(
            "generator start {} is after end {}",
            g.start, g.end
        )));
    }
    for (name, (low, high)) in [("revenue", g.revenue_range), ("expenses", g.expense_range)] {
        if !(low.is_finite() && high.is_finite()) || low < 0.0 || low > high {
            return Err(Error::InvalidData(format!(
                "invalid {} range [{}, {})",
                name, low, high
            )));
        }
    }
    if config.scenario.forest.n_trees == 0 {
        return Err(Error::InvalidData("scenario.n_trees must be at least 1".to_string()));
    }
    Ok(())
}
