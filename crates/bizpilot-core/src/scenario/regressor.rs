//! Regressor capability and the default random forest implementation

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{Error, Result};

pub const DEFAULT_N_TREES: usize = 100;
pub const DEFAULT_FOREST_SEED: u64 = 42;

/// A trainable regression strategy
///
/// The scenario model only relies on this interface, so the ensemble can be
/// replaced without touching normalization or persistence.
pub trait Regressor: Send + Sync {
    /// Human-readable strategy name, stored in artifact metadata
    fn name(&self) -> &str;

    /// Fit on row-major features `x` and targets `y`
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()>;

    /// Predict one value per row of `x`
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>>;
}

/// Forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_N_TREES,
            seed: DEFAULT_FOREST_SEED,
        }
    }
}

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Bootstrap-aggregated decision trees (smartcore)
#[derive(Serialize, Deserialize)]
pub struct ForestRegressor {
    params: ForestParams,
    model: Option<Forest>,
}

impl ForestRegressor {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            model: None,
        }
    }

    pub fn params(&self) -> ForestParams {
        self.params
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }
}

impl Default for ForestRegressor {
    fn default() -> Self {
        Self::new(ForestParams::default())
    }
}

impl std::fmt::Debug for ForestRegressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForestRegressor")
            .field("params", &self.params)
            .field("fitted", &self.is_fitted())
            .finish()
    }
}

fn to_matrix(x: &[Vec<f64>]) -> Result<DenseMatrix<f64>> {
    DenseMatrix::from_2d_vec(&x.to_vec())
        .map_err(|e| Error::InvalidData(format!("Matrix creation failed: {}", e)))
}

impl Regressor for ForestRegressor {
    fn name(&self) -> &str {
        "random_forest"
    }

    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        if x.is_empty() {
            return Err(Error::InsufficientData(
                "cannot fit regressor on zero rows".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(Error::InvalidData(format!(
                "{} feature rows but {} targets",
                x.len(),
                y.len()
            )));
        }

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(self.params.n_trees)
            .with_seed(self.params.seed);

        let model = RandomForestRegressor::fit(&to_matrix(x)?, &y.to_vec(), params)
            .map_err(|e| Error::Training(e.to_string()))?;
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| Error::Training("regressor has not been fitted".to_string()))?;
        if x.is_empty() {
            return Ok(Vec::new());
        }
        model
            .predict(&to_matrix(x)?)
            .map_err(|e| Error::Training(format!("Prediction failed: {}", e)))
    }
}
