//! Scenario profit model
//!
//! Maps (revenue, expenses, month) to a predicted profit with two stages:
//! a [`StandardScaler`] fit on the training features, then a [`Regressor`]
//! fit on the scaled features. [`ScenarioPipeline`] ties the model to a
//! [`ModelStore`] so training persists and prediction reloads.
//!
//! # Architecture
//!
//! - `normalizer` - standard-score transform
//! - `regressor` - `Regressor` trait and the smartcore random forest
//! - `store` - single-slot gzip artifact with checksum and format version
//! - `pipeline` - train/save and load/predict entry points

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::{derive, feature_matrix};
use crate::models::{Dataset, ScenarioInput};

mod normalizer;
mod pipeline;
mod regressor;
mod store;

pub use normalizer::StandardScaler;
pub use pipeline::{ScenarioPipeline, TrainingSummary};
pub use regressor::{ForestParams, ForestRegressor, Regressor, DEFAULT_FOREST_SEED, DEFAULT_N_TREES};
pub use store::{default_artifact_path, ArtifactInfo, ModelStore, ARTIFACT_FILE_NAME, FORMAT_VERSION};

/// In-sample fit quality
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    pub rmse: f64,
    pub mae: f64,
}

/// A fitted normalizer + regressor pair
#[derive(Debug, Serialize, Deserialize)]
pub struct ScenarioModel<R = ForestRegressor> {
    scaler: StandardScaler,
    regressor: R,
    samples: usize,
}

impl<R: Regressor> ScenarioModel<R> {
    /// Fit on a dataset, deriving profit and month first
    pub fn fit(dataset: &Dataset, mut regressor: R) -> Result<Self> {
        if dataset.is_empty() {
            return Err(Error::InsufficientData(
                "cannot train the scenario model on an empty dataset".to_string(),
            ));
        }

        let derived = derive(dataset)?;
        let (x, y) = feature_matrix(&derived)?;

        let scaler = StandardScaler::fit(&x)?;
        let scaled = scaler.transform(&x)?;
        regressor.fit(&scaled, &y)?;

        Ok(Self {
            scaler,
            regressor,
            samples: x.len(),
        })
    }

    /// Predict profit for one scenario
    ///
    /// Inputs are not range-checked; negative or out-of-range values are
    /// passed straight to the model.
    pub fn predict(&self, input: ScenarioInput) -> Result<f64> {
        self.predict_batch(&[input])?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Training("No prediction returned".to_string()))
    }

    pub fn predict_batch(&self, inputs: &[ScenarioInput]) -> Result<Vec<f64>> {
        let rows: Vec<Vec<f64>> = inputs.iter().map(ScenarioInput::features).collect();
        let scaled = self.scaler.transform(&rows)?;
        self.regressor.predict(&scaled)
    }

    /// RMSE and MAE of the model on a dataset
    pub fn evaluate(&self, dataset: &Dataset) -> Result<FitMetrics> {
        if dataset.is_empty() {
            return Err(Error::InsufficientData(
                "cannot evaluate on an empty dataset".to_string(),
            ));
        }
        let derived = derive(dataset)?;
        let (x, y) = feature_matrix(&derived)?;
        let predictions = self.regressor.predict(&self.scaler.transform(&x)?)?;

        let n = y.len() as f64;
        let (sq, abs) = predictions
            .iter()
            .zip(&y)
            .fold((0.0, 0.0), |(sq, abs), (p, t)| {
                (sq + (p - t).powi(2), abs + (p - t).abs())
            });

        Ok(FitMetrics {
            rmse: (sq / n).sqrt(),
            mae: abs / n,
        })
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn regressor(&self) -> &R {
        &self.regressor
    }

    /// Number of records the model was fit on
    pub fn samples(&self) -> usize {
        self.samples
    }
}
