//! Error types for the service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HubError>;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    /// Marketplace catalogue cannot support the requested operation
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payment error: {0}")]
    Payment(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HubError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HubError::Validation(_) | HubError::Payment(_) | HubError::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            HubError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HubError::NotFound(_) => StatusCode::NOT_FOUND,
            HubError::Conflict(_) => StatusCode::CONFLICT,
            HubError::Config(_)
            | HubError::Configuration(_)
            | HubError::Database(_)
            | HubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text returned to API clients; caller-facing variants carry their message bare
    pub fn client_message(&self) -> String {
        match self {
            HubError::Validation(msg)
            | HubError::Unauthorized(msg)
            | HubError::NotFound(msg)
            | HubError::Conflict(msg)
            | HubError::Payment(msg)
            | HubError::Configuration(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        let body = Json(serde_json::json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}
