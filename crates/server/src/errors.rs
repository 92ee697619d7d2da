use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ValidationKind;
use serde::Serialize;
use service::errors::{ConflictKind, ServiceError};
use thiserror::Error;
use tracing::{error, warn};

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
    pub path: String,
}

/// Error returned by handlers and extractors, rendered as [`ErrorBody`].
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
    pub path: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message, path: String::new() }
    }

    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn malformed(detail: impl Into<String>, path: &str) -> Self {
        Self::from_validation(ValidationKind::Malformed(detail.into()), path)
    }

    pub fn from_validation(kind: ValidationKind, path: &str) -> Self {
        let label = match kind {
            ValidationKind::Malformed(_) => "Bad Request",
            _ => "Validation Error",
        };
        Self::new(StatusCode::BAD_REQUEST, label, Some(kind.to_string())).at(path)
    }

    pub fn from_service(e: ServiceError, path: &str) -> Self {
        let (status, label) = match &e {
            ServiceError::Validation(kind) => return Self::from_validation(kind.clone(), path),
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            ServiceError::Conflict(ConflictKind::ReferentialBlock { .. }) => (StatusCode::BAD_REQUEST, "Cannot Delete"),
            ServiceError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
            ServiceError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };
        let message = match e {
            ServiceError::Db(raw) => raw,
            other => other.to_string(),
        };
        Self::new(status, label, Some(message)).at(path)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let message = self.message.unwrap_or_else(|| self.error.to_string());
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), path = %self.path, error = %message, "request failed");
        } else {
            warn!(status = self.status.as_u16(), path = %self.path, error = %message, "request rejected");
        }
        let body = ErrorBody { status: self.status.as_u16(), error: self.error, message, path: self.path };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid bind address '{0}'")]
    BindAddr(String),
}
