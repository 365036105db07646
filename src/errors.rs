use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(#[source] anyhow::Error),

    #[error("Access denied: {action}")]
    AccessDenied { action: String },

    #[error("Database error: {0}")]
    Database(#[source] anyhow::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict error: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalService(#[source] anyhow::Error),

    #[error("No {resource} found for {identifier}")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Validation errors")]
    ValidationErrors(HashMap<String, Vec<String>>),
}

impl AppError {
    pub fn not_found(resource: &'static str, identifier: impl Into<String>) -> Self {
        AppError::NotFound {
            resource,
            identifier: identifier.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Authentication(e) => (StatusCode::UNAUTHORIZED, format!("{}", e)),
            AppError::AccessDenied { action } => {
                (StatusCode::FORBIDDEN, format!("Access denied: {}", action))
            }
            AppError::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::ExternalService(e) => (
                StatusCode::BAD_GATEWAY,
                format!("External service error: {}", e),
            ),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, format!("{}", self)),
            AppError::UrlParse(e) => (StatusCode::BAD_REQUEST, format!("Invalid URL: {}", e)),
            AppError::Unexpected(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An unexpected error occurred: {}", e),
            ),
            AppError::ValidationErrors(_) => {
                (StatusCode::BAD_REQUEST, "Validation failed".to_string())
            }
        };

        tracing::error!(
            error_type = %self,
            error_message = %error_message,
            status_code = %status,
            "Request error"
        );

        let body = match &self {
            AppError::ValidationErrors(validation_errors) => Json(json!({
                "message": error_message,
                "status": status.as_u16(),
                "errors": validation_errors
            })),
            AppError::NotFound {
                resource,
                identifier,
            } => Json(json!({
                "message": error_message,
                "status": status.as_u16(),
                "resource": resource,
                "identifier": identifier
            })),
            _ => Json(json!({
                "message": error_message,
                "status": status.as_u16()
            })),
        };
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::not_found("record", "requested criteria"),
            _ => AppError::Database(anyhow::Error::new(err).context("SQLx operation failed")),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!(
            error = %err,
            url = ?err.url(),
            status = ?err.status(),
            is_timeout = err.is_timeout(),
            is_connect = err.is_connect(),
            "HTTP request failed"
        );

        let context = match err.url() {
            Some(url) => format!("External HTTP request failed - URL: {}", url),
            None => "External HTTP request failed".to_string(),
        };

        AppError::ExternalService(anyhow::Error::new(err).context(context))
    }
}
