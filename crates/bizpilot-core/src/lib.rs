//! Bizpilot Core Library
//!
//! Shared functionality for the Bizpilot small-business dashboard:
//! - Synthetic monthly revenue/expense data
//! - Feature derivation (profit, month)
//! - Scenario profit model (standard scaler + random forest) with a
//!   single-slot artifact store
//! - Workflow suggestion and compliance checklist lookup
//! - TOML configuration with embedded defaults

pub mod compliance;
pub mod config;
pub mod error;
pub mod features;
pub mod generator;
pub mod import;
pub mod models;
pub mod scenario;
pub mod workflow;

pub use compliance::{ComplianceCatalog, ComplianceReport, FULLY_COMPLIANT};
pub use config::{AppConfig, ScenarioConfig};
pub use error::{Error, Result};
pub use features::derive;
pub use generator::{generate, generate_with, GeneratorConfig};
pub use models::{Dataset, FinancialRecord, RawRecord, ScenarioInput};
pub use scenario::{
    ArtifactInfo, FitMetrics, ForestParams, ForestRegressor, ModelStore, Regressor,
    ScenarioModel, ScenarioPipeline, TrainingSummary,
};
pub use workflow::{suggest, WorkflowConfig, WorkflowSuggestion};
