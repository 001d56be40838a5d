//! Dataset handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use bizpilot_core::{derive, generate_with, FinancialRecord};

use crate::{AppError, AppState};

#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub count: usize,
    pub records: Vec<FinancialRecord>,
}

/// GET /api/dataset - The generated dataset with derived columns, for charting
pub async fn get_dataset(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatasetResponse>, AppError> {
    let dataset = derive(&generate_with(&state.app.generator))?;
    Ok(Json(DatasetResponse {
        count: dataset.len(),
        records: dataset.into_records(),
    }))
}
