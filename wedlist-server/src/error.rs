//! HTTP error type for wedlist-server
//!
//! Every handler returns [`ApiResult`]. Errors render as JSON
//! `{"message": ..., "error": CODE}` with the status below:
//!
//! | Cause                         | Status |
//! |-------------------------------|--------|
//! | validation / CSV parse / body | 400    |
//! | no caller identity            | 401    |
//! | missing or not owned          | 404    |
//! | database / internal           | 500    |

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use wedlist_common::Error as CommonError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Rejected by an axum extractor; keeps the extractor's status
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// Repository, importer or config error
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Rejected { status, message } => (*status, "REJECTED", message.clone()),
            ApiError::Common(err) => match err {
                CommonError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
                }
                CommonError::Parse(_) => (StatusCode::BAD_REQUEST, "PARSE_ERROR", err.to_string()),
                CommonError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
                CommonError::Unauthorized(_) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string())
                }
                CommonError::Database(_)
                | CommonError::Io(_)
                | CommonError::Config(_)
                | CommonError::Internal(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                ),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Malformed and mistyped JSON bodies are both plain validation failures
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Rejected {
            status: err.status(),
            message: format!("Invalid multipart request: {}", err.body_text()),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = self.parts();

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "message": message,
            "error": error_code,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(CommonError::not_found("Wedding"));
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
        assert_eq!(message, "Wedding not found");
    }

    #[test]
    fn test_database_error_hides_detail() {
        let err = ApiError::from(CommonError::Database(sqlx::Error::RowNotFound));
        let (status, _, message) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }

    #[test]
    fn test_parse_error_is_bad_request() {
        let err = ApiError::from(CommonError::Parse("line 3".to_string()));
        assert_eq!(err.parts().0, StatusCode::BAD_REQUEST);
    }
}
