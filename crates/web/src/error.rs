use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::error::StorageError;
use thiserror::Error;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Unauthorized")]
    Unauthorized,
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(
                StorageError::ConstraintViolation(_)
                | StorageError::InvalidTransition { .. }
                | StorageError::InvalidState { .. },
            ) => StatusCode::CONFLICT,
            Self::Storage(StorageError::Validation(_) | StorageError::InvalidWeights(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Storage(StorageError::Forbidden(_)) => StatusCode::FORBIDDEN,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(
                e @ (StorageError::ConstraintViolation(_)
                | StorageError::InvalidTransition { .. }
                | StorageError::InvalidState { .. }
                | StorageError::Validation(_)
                | StorageError::InvalidWeights(_)
                | StorageError::Forbidden(_)),
            ) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}
