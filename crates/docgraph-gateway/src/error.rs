//! Error handling for the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docgraph_proto::{codes, ErrorBody};
use thiserror::Error;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// A core resolver error.
    #[error(transparent)]
    Core(#[from] docgraph_core::Error),

    /// Internal gateway error.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use docgraph_core::Error as CoreError;

        let (status, code, message) = match &self {
            AppError::Core(err) => match err {
                CoreError::InvalidFilter(_) => {
                    (StatusCode::BAD_REQUEST, codes::INVALID_FILTER, err.to_string())
                }
                CoreError::UnknownOperation(_) => {
                    (StatusCode::BAD_REQUEST, codes::UNKNOWN_OPERATION, err.to_string())
                }
                CoreError::InvalidArgument(_) => {
                    (StatusCode::BAD_REQUEST, codes::INVALID_ARGUMENT, err.to_string())
                }
                CoreError::StorageUnavailable(detail) => {
                    // Backend detail goes to the log, not the caller.
                    tracing::error!(%detail, "storage backend unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        codes::STORAGE_UNAVAILABLE,
                        "storage backend unavailable".to_string(),
                    )
                }
                CoreError::Serialization(detail) => {
                    tracing::error!(%detail, "record codec failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        codes::INTERNAL,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, codes::INTERNAL, msg.clone())
            }
        };

        (status, Json(ErrorBody::new(code, message))).into_response()
    }
}
