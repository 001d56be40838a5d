//! Scenario model handlers
//!
//! Training and prediction both touch the artifact on disk and run CPU-bound
//! forest code, so the work is moved to the blocking pool.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use bizpilot_core::{
    generate_with, ArtifactInfo, Dataset, RawRecord, ScenarioInput, TrainingSummary,
};

use crate::{AppError, AppState};

/// Request body for training
///
/// An empty body (or no `records`) trains on the generated dataset.
#[derive(Debug, Default, Deserialize)]
pub struct TrainRequest {
    pub records: Option<Vec<RawRecord>>,
}

/// Where the training data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSource {
    Generated,
    Request,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub source: DatasetSource,
    #[serde(flatten)]
    pub summary: TrainingSummary,
}

/// Request body for a prediction
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub revenue: f64,
    pub expenses: f64,
    /// Not range-checked; out-of-range months reach the model as-is
    pub month: i64,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub revenue: f64,
    pub expenses: f64,
    pub month: i64,
    pub predicted_profit: f64,
}

/// POST /api/scenario/train - Fit the model and replace the stored artifact
pub async fn train_scenario(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TrainResponse>, AppError> {
    let request: TrainRequest = if body.iter().all(u8::is_ascii_whitespace) {
        TrainRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::bad_request(&format!("Invalid request body: {}", e)))?
    };

    let (source, dataset) = match request.records {
        Some(rows) => (DatasetSource::Request, Dataset::from_raw(rows)?),
        None => (
            DatasetSource::Generated,
            generate_with(&state.app.generator),
        ),
    };

    info!(source = ?source, records = dataset.len(), "Training requested");

    let pipeline = state.pipeline.clone();
    let summary = tokio::task::spawn_blocking(move || pipeline.train(&dataset)).await??;

    Ok(Json(TrainResponse { source, summary }))
}

/// POST /api/scenario/predict - Predict profit with the stored model
pub async fn predict_scenario(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(request) = payload.map_err(AppError::json_rejection)?;
    let input = ScenarioInput::new(request.revenue, request.expenses, request.month);

    let pipeline = state.pipeline.clone();
    let predicted_profit = tokio::task::spawn_blocking(move || pipeline.predict(input)).await??;

    Ok(Json(PredictResponse {
        revenue: input.revenue,
        expenses: input.expenses,
        month: input.month,
        predicted_profit,
    }))
}

/// GET /api/scenario/model - Metadata of the stored artifact
pub async fn get_model_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ArtifactInfo>, AppError> {
    let pipeline = state.pipeline.clone();
    let info = tokio::task::spawn_blocking(move || pipeline.model_info()).await??;
    Ok(Json(info))
}
