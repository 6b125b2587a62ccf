use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::compositor::ComposeError;
use crate::registry::RegistryError;
use crate::theme::ThemeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::UnknownTemplate { id } => AppError::UnknownTemplate(id),
            other => AppError::Internal(anyhow::anyhow!(other)),
        }
    }
}

impl From<ThemeError> for AppError {
    fn from(e: ThemeError) -> Self {
        AppError::InvalidColor(e.to_string())
    }
}

impl From<ComposeError> for AppError {
    fn from(e: ComposeError) -> Self {
        match e {
            ComposeError::UnknownTemplate(e) => e.into(),
            ComposeError::InvalidColor(e) => e.into(),
            e @ ComposeError::Serialize { .. } => AppError::Generation(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnknownTemplate(id) => (
                StatusCode::NOT_FOUND,
                "UNKNOWN_TEMPLATE",
                format!("Template '{id}' does not exist"),
            ),
            AppError::InvalidColor(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_COLOR",
                msg.clone(),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    "The document could not be generated".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
