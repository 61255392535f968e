//! Narrative rendering endpoint

use axum::{extract::State, Json};
use serde::Deserialize;

use dartlens_parser::Document;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NarrativeRequest {
    pub text: String,
}

pub async fn api_narrative(
    State(state): State<AppState>,
    Json(request): Json<NarrativeRequest>,
) -> Json<Document> {
    Json(state.parser.parse(&request.text))
}
