//! Amount formatting endpoint

use axum::Json;
use serde::{Deserialize, Serialize};

use dartlens_utils::{decode_optional, format_raw_amount};

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    /// Raw amount strings as they appear in statement rows
    pub amounts: Vec<Option<String>>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FormattedAmount {
    pub raw: Option<String>,
    pub value: i64,
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub amounts: Vec<FormattedAmount>,
}

pub async fn api_format_amount(Json(request): Json<FormatRequest>) -> Json<FormatResponse> {
    let amounts = request
        .amounts
        .into_iter()
        .map(|raw| FormattedAmount {
            value: decode_optional(raw.as_deref()),
            display: format_raw_amount(raw.as_deref()),
            raw,
        })
        .collect();
    Json(FormatResponse { amounts })
}
