//! Compliance checklist handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use bizpilot_core::ComplianceReport;

use crate::{AppError, AppState};

#[derive(Debug, Serialize)]
pub struct IndustryEntry {
    pub industry: String,
    pub regulations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct IndustriesResponse {
    pub default_industry: String,
    pub industries: Vec<IndustryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ComplianceCheckRequest {
    /// Falls back to the configured default industry
    pub industry: Option<String>,
    /// Comma-separated policies currently in place
    #[serde(default)]
    pub policies: String,
}

/// GET /api/compliance/industries - Known industries and their regulations
pub async fn list_industries(State(state): State<Arc<AppState>>) -> Json<IndustriesResponse> {
    let catalog = &state.app.compliance;
    let industries = catalog
        .industries()
        .map(|industry| IndustryEntry {
            industry: industry.to_string(),
            regulations: catalog
                .regulations(industry)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
        })
        .collect();

    Json(IndustriesResponse {
        default_industry: catalog.default_industry().to_string(),
        industries,
    })
}

/// POST /api/compliance/check - Report regulations not covered by the policies
pub async fn check_compliance(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ComplianceCheckRequest>, JsonRejection>,
) -> Result<Json<ComplianceReport>, AppError> {
    let Json(request) = payload.map_err(AppError::json_rejection)?;
    let catalog = &state.app.compliance;
    let report = match request.industry.as_deref().map(str::trim) {
        Some(industry) if !industry.is_empty() => catalog.check(industry, &request.policies)?,
        _ => catalog.check_default(&request.policies)?,
    };
    Ok(Json(report))
}
