use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::assets::AssetError;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `INVALID_REQUEST`,
    /// `NOT_FOUND`, `INTERNAL_ERROR`.
    #[schema(example = "INVALID_REQUEST")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Invalid filename")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or disallowed filename. The message is deliberately
    /// generic: the response never reveals which validation rule fired.
    InvalidRequest,
    /// Malformed query parameters; the message may describe the problem.
    Validation(String),
    NotFound(String),
    /// The bundle filter matched nothing; reported as "nothing to
    /// package", not as an internal fault.
    EmptyBundle,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::InvalidRequest => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "INVALID_REQUEST",
                    message: "Invalid filename".into(),
                },
            ),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "INVALID_REQUEST",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::EmptyBundle => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: "No technical specifications found".into(),
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<AssetError> for AppError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::InvalidRequest => AppError::InvalidRequest,
            AssetError::NotFound => AppError::NotFound("File not found".into()),
            AssetError::EmptyBundle => AppError::EmptyBundle,
            AssetError::Aborted => AppError::Internal("bundle consumer disconnected".into()),
            AssetError::Io(e) => AppError::Internal(format!("IO error: {e}")),
            AssetError::Archive(e) => AppError::Internal(format!("archive error: {e}")),
        }
    }
}
