//! Workflow suggestion handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use bizpilot_core::WorkflowSuggestion;

use crate::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    /// Overrides the configured inefficiency score; blank means unset
    pub score: Option<String>,
}

/// GET /api/workflow/suggestion - Suggestion for the configured (or given) score
pub async fn get_workflow_suggestion(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> Result<Json<WorkflowSuggestion>, AppError> {
    let Query(query) = query.map_err(AppError::query_rejection)?;
    let workflow = &state.app.workflow;

    let score = match query.score.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<f64>() {
            Ok(score) if score.is_finite() => Some(score),
            _ => {
                return Err(AppError::bad_request(&format!(
                    "score must be a finite number, got '{}'",
                    raw
                )));
            }
        },
    };

    let suggestion = match score {
        Some(score) => workflow.suggestion_for(score),
        None => workflow.suggestion(),
    };
    Ok(Json(suggestion))
}
