//! Error types for dartlens-core
//!
//! Derivations themselves never fail: missing accounts read as zero and
//! degenerate denominators yield zero ratios. Errors only arise at the edges,
//! when statement data is loaded or an upstream envelope reports a failure.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Statement source not found
    FileNotFound,
    /// Payload is not statement data
    InvalidFormat,
    /// Filings API reported a non-success status
    Upstream,
    /// Invalid request value
    ValidationError,
    /// IO error
    IoError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::Upstream => write!(f, "UPSTREAM"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for dartlens-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Filings API returned status {status}: {message}")]
    Upstream { status: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("IO error occurred")]
    IoError,
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::Upstream { .. } => ErrorCode::Upstream,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::IoError => ErrorCode::IoError,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::FileNotFound { .. } => ErrorSeverity::Error,
            CoreError::InvalidFormat { .. } => ErrorSeverity::Error,
            CoreError::Upstream { .. } => ErrorSeverity::Warning,
            CoreError::ValidationError { .. } => ErrorSeverity::Info,
            CoreError::IoError => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::FileNotFound { .. } => {
                details = details
                    .with_suggestion("Check if the file path is correct.".to_string())
                    .with_suggestion("Ensure the file exists and is readable.".to_string());
            }
            CoreError::InvalidFormat { message } => {
                details = details
                    .with_detail(serde_json::json!({ "format_message": message }))
                    .with_suggestion(
                        "Provide a filings API response or a JSON array of statement rows."
                            .to_string(),
                    );
            }
            CoreError::Upstream { status, .. } => {
                details = details.with_detail(serde_json::json!({ "status": status }));
                if status == "013" {
                    details = details.with_suggestion(
                        "No statement data exists for this company, year and report code."
                            .to_string(),
                    );
                }
            }
            CoreError::ValidationError { message } => {
                details = details.with_detail(serde_json::json!({ "validation_message": message }));
            }
            CoreError::IoError => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(_error: io::Error) -> Self {
        CoreError::IoError
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::InvalidFormat {
            message: error.to_string(),
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
        }
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info => log::info!(
                target: "dartlens::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error,
                context.operation
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "dartlens::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error,
                context.operation
            ),
            ErrorSeverity::Error => log::error!(
                target: "dartlens::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error.to_details(),
                context.operation
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::Upstream.to_string(), "UPSTREAM");
        assert_eq!(ErrorCode::InvalidFormat.to_string(), "INVALID_FORMAT");
        assert_eq!(ErrorCode::FileNotFound.to_string(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_core_error_severity() {
        let error = CoreError::Upstream {
            status: "013".to_string(),
            message: "조회된 데이타가 없습니다.".to_string(),
        };
        assert_eq!(error.severity(), ErrorSeverity::Warning);
        assert_eq!(CoreError::IoError.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_upstream_details() {
        let error = CoreError::Upstream {
            status: "013".to_string(),
            message: "조회된 데이타가 없습니다.".to_string(),
        };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::Upstream);
        assert_eq!(details.details, Some(serde_json::json!({ "status": "013" })));
        assert_eq!(details.suggestions.len(), 1);
        assert!(details.message.contains("013"));
    }

    #[test]
    fn test_serde_error_maps_to_invalid_format() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let error = CoreError::from(err);
        assert_eq!(error.code(), ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_error_details_display() {
        let details = ErrorDetails::new(ErrorCode::ValidationError, "bad period".to_string())
            .with_suggestion("Use current, prior or prior_prior".to_string());
        let text = details.to_string();

        assert!(text.starts_with("[VALIDATION_ERROR] bad period"));
        assert!(text.contains("Suggestions:"));
    }

    #[test]
    fn test_validation_details() {
        let error = CoreError::ValidationError {
            message: "Invalid period: next".to_string(),
        };
        let details = error.to_details();

        assert_eq!(error.severity(), ErrorSeverity::Info);
        assert_eq!(details.code, ErrorCode::ValidationError);
        assert_eq!(
            details.details,
            Some(serde_json::json!({ "validation_message": "Invalid period: next" }))
        );
    }
}
