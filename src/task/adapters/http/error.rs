//! Translation of task errors into HTTP responses.

use crate::task::{
    domain::TaskDomainError,
    ports::TaskRepositoryError,
    services::TaskLifecycleError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Client-facing message for unknown or malformed task identifiers.
pub const NOT_FOUND_MESSAGE: &str = "task not found";

/// Client-facing message for bodies or query strings that fail to decode.
pub const BAD_REQUEST_MESSAGE: &str = "malformed request";

/// Errors surfaced by the task HTTP handlers.
///
/// Responses carry fixed messages for `NotFound` and `BadRequest`; the
/// offending input is only logged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed a field rule.
    #[error(transparent)]
    Validation(TaskDomainError),
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(String),
    /// The request could not be decoded.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The backing store failed.
    #[error(transparent)]
    Storage(TaskRepositoryError),
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Validation(domain) => Self::Validation(domain),
            TaskLifecycleError::NotFound(id) => Self::NotFound(id.to_string()),
            TaskLifecycleError::Storage(storage) => Self::Storage(storage),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Storage(_) => "storage",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::Validation(domain) => ErrorBody {
                kind: self.kind(),
                message: domain.message().to_owned(),
                field: Some(domain.field().as_str()),
            },
            Self::Storage(storage) => {
                error!(error = %storage, "task storage failure");
                ErrorBody {
                    kind: self.kind(),
                    message: "internal storage error".to_owned(),
                    field: None,
                }
            }
            Self::NotFound(raw_id) => {
                debug!(task_id = %raw_id, "task not found");
                ErrorBody {
                    kind: self.kind(),
                    message: NOT_FOUND_MESSAGE.to_owned(),
                    field: None,
                }
            }
            Self::BadRequest(detail) => {
                debug!(%detail, "request rejected");
                ErrorBody {
                    kind: self.kind(),
                    message: BAD_REQUEST_MESSAGE.to_owned(),
                    field: None,
                }
            }
        };
        (self.status(), Json(ErrorEnvelope { error: body })).into_response()
    }
}
