use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified error type for startup loading and dashboard API responses.
#[derive(Debug)]
pub enum DashError {
    /// Fatal at startup: unreadable directory, malformed CSV, unpaired stats file.
    Load(String),
    NotFound(String),
    Internal(String),
}

impl DashError {
    /// Prefix a load error with the file it came from.
    pub fn in_file(self, file: &str) -> Self {
        match self {
            Self::Load(msg) => Self::Load(format!("{file}: {msg}")),
            other => other,
        }
    }
}

impl std::fmt::Display for DashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(msg) => write!(f, "load_error: {msg}"),
            Self::NotFound(msg) => write!(f, "not_found: {msg}"),
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for DashError {}

impl IntoResponse for DashError {
    fn into_response(self) -> Response {
        let (status, error_str) = match &self {
            Self::Load(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("load_error:{msg}")),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = json!({ "error": error_str });
        (status, axum::Json(body)).into_response()
    }
}

impl From<csv::Error> for DashError {
    fn from(e: csv::Error) -> Self {
        Self::Load(e.to_string())
    }
}

impl From<std::io::Error> for DashError {
    fn from(e: std::io::Error) -> Self {
        Self::Load(e.to_string())
    }
}

impl From<serde_json::Error> for DashError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
