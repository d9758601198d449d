use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One segment of a validation error location, e.g. `["body", "name"]` or
/// `["query", "limit", 0]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    Index(i64),
    Field(String),
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocSegment::Index(i) => write!(f, "{i}"),
            LocSegment::Field(name) => f.write_str(name),
        }
    }
}

/// A single field-level validation failure as reported under HTTP 422.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationError {
    /// Dotted location, e.g. `body.name`.
    pub fn location(&self) -> String {
        self.loc
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationError>),
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: ErrorDetail,
}

/// Structured error returned by every backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Validation error: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    if errors.is_empty() {
        return "request rejected".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{}: {}", e.location(), e.msg))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiError {
    /// Maps a non-2xx response to an error, parsing FastAPI's `{"detail": ...}` body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.detail);

        let message = match detail {
            Some(ErrorDetail::Validation(errors)) if status == 422 => {
                return ApiError::Validation(errors);
            }
            Some(ErrorDetail::Validation(errors)) => summarize(&errors),
            Some(ErrorDetail::Message(msg)) => msg,
            Some(ErrorDetail::Other(value)) => value.to_string(),
            None if body.trim().is_empty() => default_reason(status).to_string(),
            None => body.trim().to_string(),
        };

        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Status { status, message },
        }
    }

    /// HTTP status code, where the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Validation(_) => Some(422),
            ApiError::NotFound(_) => Some(404),
            ApiError::BadRequest(_) => Some(400),
            ApiError::Conflict(_) => Some(409),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::Server { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Decode(_) | ApiError::InvalidPdf(_) | ApiError::Invalid(_) | ApiError::Io(_) => {
                None
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Human-readable detail suitable for a notification body.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Validation(errors) => summarize(errors),
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::InvalidPdf(msg)
            | ApiError::Invalid(msg) => msg.clone(),
            ApiError::Server { message, .. } | ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

fn default_reason(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Validation Error",
        500 => "Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Request failed",
    }
}
