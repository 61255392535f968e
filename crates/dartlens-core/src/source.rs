//! Statement payload decoding
//!
//! The filings API wraps rows in an envelope `{status, message, list}`.
//! Saved statement files may hold either that envelope or a bare row array.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::model::LineItem;

/// Envelope status reported on success
pub const STATUS_OK: &str = "000";

/// Filings API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub list: Vec<LineItem>,
}

impl StatementResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Rows of a successful response
    pub fn into_items(self) -> CoreResult<Vec<LineItem>> {
        if !self.is_success() {
            log::warn!(
                "filings API returned status {}: {}",
                self.status,
                self.message
            );
            return Err(CoreError::Upstream {
                status: self.status,
                message: self.message,
            });
        }
        Ok(self.list)
    }
}

/// Either shape a statement payload may take
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatementPayload {
    Envelope(StatementResponse),
    Rows(Vec<LineItem>),
}

impl StatementPayload {
    pub fn into_items(self) -> CoreResult<Vec<LineItem>> {
        match self {
            StatementPayload::Envelope(response) => response.into_items(),
            StatementPayload::Rows(rows) => Ok(rows),
        }
    }
}

/// Decode statement rows from JSON text
pub fn parse_statement_json(json: &str) -> CoreResult<Vec<LineItem>> {
    let payload: StatementPayload = serde_json::from_str(json)?;
    payload.into_items()
}

/// Read and decode a statement file
pub async fn load_statement_file(path: &Path) -> CoreResult<Vec<LineItem>> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: path.to_string_lossy().to_string(),
        });
    }
    let content = tokio::fs::read_to_string(path).await?;
    let items = parse_statement_json(&content)?;
    log::debug!("loaded {} statement rows from {}", items.len(), path.display());
    Ok(items)
}

// ==================== Tests ====================
