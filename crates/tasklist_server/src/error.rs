//! API error handling.
//!
//! Error bodies are always `{ "code": string, "message": string }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use tasklist_core::{RepoError, TaskServiceError};

/// API error body for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable code for programmatic handling.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Status code plus error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// 400 for text that is missing, empty or whitespace-only.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::new("VALIDATION_ERROR", message),
        )
    }

    /// 400 for bodies that are not valid JSON of the expected shape.
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new("INVALID_BODY", message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    /// 503 for store failures the client may retry later.
    pub fn store_unavailable() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiError::new("STORE_UNAVAILABLE", "the task store is unavailable"),
        )
    }

    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", "an internal error occurred"),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TaskServiceError> for ApiErrorResponse {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::InvalidText => Self::validation("task text must not be empty"),
            TaskServiceError::TaskNotFound(id) => Self::not_found(format!("task not found: {id}")),
            // Store details stay in the log, not in the response body.
            TaskServiceError::Repo(RepoError::Db(db_err)) => {
                error!("event=http_error module=server status=error error_code=store_unavailable error={db_err}");
                Self::store_unavailable()
            }
            other => {
                error!("event=http_error module=server status=error error_code=internal error={other}");
                Self::internal_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiErrorResponse;
    use axum::http::StatusCode;
    use tasklist_core::db::DbError;
    use tasklist_core::{RepoError, TaskServiceError};
    use uuid::Uuid;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (TaskServiceError::InvalidText, StatusCode::BAD_REQUEST),
            (
                TaskServiceError::TaskNotFound(Uuid::new_v4()),
                StatusCode::NOT_FOUND,
            ),
            (
                TaskServiceError::Repo(RepoError::Db(DbError::Sqlite(
                    rusqlite::Error::InvalidQuery,
                ))),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                TaskServiceError::InconsistentState("gone"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiErrorResponse::from(err).status, expected);
        }
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let response = ApiErrorResponse::from(TaskServiceError::Repo(RepoError::InvalidData(
            "secret row contents".to_string(),
        )));
        assert_eq!(response.error.code, "INTERNAL_ERROR");
        assert!(!response.error.message.contains("secret"));
    }
}
