//! Error types for dartlens-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use dartlens_core::{CoreError, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorLogger};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(error) => match error.code() {
                ErrorCode::FileNotFound => StatusCode::NOT_FOUND,
                ErrorCode::InvalidFormat | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
                ErrorCode::Upstream => StatusCode::BAD_GATEWAY,
                ErrorCode::IoError => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn error_code(&self) -> String {
        match self {
            ApiError::Core(error) => error.code().to_string(),
        }
    }
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Core(error) => {
                DefaultErrorLogger.log_error(error, &ErrorContext::new("http_request"));
                let details = error.to_details();
                ErrorResponse {
                    code: details.code.to_string(),
                    message: details.message,
                    details: details.details,
                    suggestions: details.suggestions,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid = ApiError::from(CoreError::ValidationError {
            message: "Invalid period: next".to_string(),
        });
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.error_code(), "VALIDATION_ERROR");

        let upstream = ApiError::from(CoreError::Upstream {
            status: "020".to_string(),
            message: "요청 제한을 초과하였습니다.".to_string(),
        });
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.error_code(), "UPSTREAM");

        let io = ApiError::from(CoreError::IoError);
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::from(CoreError::InvalidFormat {
            message: "expected array".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
