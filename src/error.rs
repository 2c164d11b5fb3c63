//! Error taxonomy shared by the storage and HTTP layers.
//!
//! Every route handler returns `Result<_, Error>`; the `IntoResponse`
//! impl converts the variant to an HTTP status and a JSON
//! `{message, error}` body at the route boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Duplicate identity (roll number or email already registered).
    #[error("{0}")]
    Conflict(String),

    /// Empty result set.
    #[error("{0}")]
    NotFound(String),

    /// A storage call failed.
    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The upstream auth gateway is unconfigured or unreachable.
    #[error("auth gateway error: {0}")]
    Gateway(String),

    /// Startup configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_)
            | Self::Gateway(_)
            | Self::Config(_)
            | Self::Json(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage",
            Self::Gateway(_) => "gateway",
            Self::Config(_) => "config",
            Self::Json(_) => "json",
            Self::Io(_) => "io",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(kind = self.kind(), "request failed: {self}");
        }
        let body = json!({
            "message": self.to_string(),
            "error": self.kind(),
        });
        (status, Json(body)).into_response()
    }
}
