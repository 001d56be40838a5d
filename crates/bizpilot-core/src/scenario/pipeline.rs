//! Train → persist and load → predict

use serde::{Deserialize, Serialize};
use tracing::info;

use super::regressor::{ForestParams, ForestRegressor, Regressor};
use super::store::{ArtifactInfo, ModelStore};
use super::{FitMetrics, ScenarioModel};
use crate::error::Result;
use crate::models::{Dataset, ScenarioInput};

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub samples: usize,
    pub regressor: String,
    pub n_trees: usize,
    pub seed: u64,
    /// In-sample error, not a generalization estimate
    pub metrics: FitMetrics,
    pub artifact: ArtifactInfo,
}

/// Owns the model store and forest settings for one deployment
///
/// Cheap to clone; every call goes through the artifact on disk, so clones
/// share whatever model was saved last.
#[derive(Debug, Clone)]
pub struct ScenarioPipeline {
    store: ModelStore,
    params: ForestParams,
}

impl ScenarioPipeline {
    pub fn new(store: ModelStore, params: ForestParams) -> Self {
        Self { store, params }
    }

    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    pub fn params(&self) -> ForestParams {
        self.params
    }

    /// Fit a new model and replace the persisted artifact
    ///
    /// Nothing is written if fitting fails.
    pub fn train(&self, dataset: &Dataset) -> Result<TrainingSummary> {
        info!(
            records = dataset.len(),
            n_trees = self.params.n_trees,
            seed = self.params.seed,
            "Training scenario model"
        );

        let model = ScenarioModel::fit(dataset, ForestRegressor::new(self.params))?;
        let metrics = model.evaluate(dataset)?;
        let artifact = self.store.save(&model)?;

        info!(
            samples = model.samples(),
            rmse = metrics.rmse,
            mae = metrics.mae,
            "Scenario model trained"
        );

        Ok(TrainingSummary {
            samples: model.samples(),
            regressor: model.regressor().name().to_string(),
            n_trees: self.params.n_trees,
            seed: self.params.seed,
            metrics,
            artifact,
        })
    }

    /// Predict profit with the most recently persisted model
    pub fn predict(&self, input: ScenarioInput) -> Result<f64> {
        let model: ScenarioModel = self.store.load()?;
        model.predict(input)
    }

    /// Predict several scenarios against one loaded model
    pub fn predict_batch(&self, inputs: &[ScenarioInput]) -> Result<Vec<f64>> {
        let model: ScenarioModel = self.store.load()?;
        model.predict_batch(inputs)
    }

    /// Metadata of the persisted model
    pub fn model_info(&self) -> Result<ArtifactInfo> {
        self.store.info()
    }
}
