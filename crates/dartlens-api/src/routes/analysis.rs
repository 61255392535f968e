//! Statement analysis endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use dartlens_core::{FinancialAnalysis, Period, StatementPayload};

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    /// Filings API envelope or a bare array of rows
    pub statement: StatementPayload,
    /// `current`, `prior`, `prior_prior` or the Korean labels
    #[serde(default)]
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: FinancialAnalysis,
    pub digest: Vec<String>,
}

pub async fn api_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> ApiResult<Json<AnalysisResponse>> {
    let period = request
        .period
        .as_deref()
        .map(str::parse::<Period>)
        .transpose()?;
    let items = request.statement.into_items()?;

    let analysis = state.analyzer.analyze(&items, period);
    let digest = state.analyzer.digest(&items);

    Ok(Json(AnalysisResponse { analysis, digest }))
}
