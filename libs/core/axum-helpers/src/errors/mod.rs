pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "No existe categoría con id: 7",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code, also logged as `error_code`
    pub code: i32,
    /// Machine-readable identifier
    pub error: String,
    pub message: String,
    /// Per-field messages for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details,
        }
    }
}

/// Application error rendered as an [`ErrorResponse`].
///
/// Each variant is logged once, when the response is built.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query string error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    fn into_parts(self) -> (StatusCode, ErrorCode, String, Option<Value>) {
        match self {
            AppError::JsonExtractorRejection(e) => {
                let code = ErrorCode::JsonExtraction;
                tracing::info!(error_code = code.code(), "JSON extraction error: {}", e);
                (StatusCode::BAD_REQUEST, code, e.body_text(), None)
            }
            AppError::QueryRejection(e) => {
                let code = ErrorCode::InvalidQuery;
                tracing::info!(error_code = code.code(), "Query string error: {}", e);
                (StatusCode::BAD_REQUEST, code, e.body_text(), None)
            }
            AppError::ValidationError(e) => {
                let code = ErrorCode::ValidationError;
                tracing::info!(error_code = code.code(), "Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    code,
                    code.default_message().to_string(),
                    Some(validation_details(&e)),
                )
            }
            AppError::InvalidId(raw) => {
                let code = ErrorCode::InvalidId;
                tracing::info!(error_code = code.code(), value = %raw, "Invalid identifier");
                (
                    StatusCode::BAD_REQUEST,
                    code,
                    format!("{}: {}", code.default_message(), raw),
                    None,
                )
            }
            AppError::Database(e) => map_db_error(&e),
            AppError::BadRequest(msg) => {
                let code = ErrorCode::BadRequest;
                tracing::info!(error_code = code.code(), "Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, code, msg, None)
            }
            AppError::Duplicate(msg) => {
                let code = ErrorCode::DuplicateResource;
                tracing::info!(error_code = code.code(), "Duplicate: {}", msg);
                (StatusCode::BAD_REQUEST, code, msg, None)
            }
            AppError::NotFound(msg) => {
                let code = ErrorCode::NotFound;
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, code, msg, None)
            }
            AppError::InternalServerError(msg) => {
                let code = ErrorCode::InternalError;
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    code.default_message().to_string(),
                    None,
                )
            }
            AppError::ServiceUnavailable(msg) => {
                let code = ErrorCode::ServiceUnavailable;
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, code, msg, None)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.into_parts();
        (status, Json(ErrorResponse::new(code, message, details))).into_response()
    }
}

/// Database failures never leak driver text to clients; it is logged instead.
fn map_db_error(error: &DbErr) -> (StatusCode, ErrorCode, String, Option<Value>) {
    let (status, code) = match error {
        DbErr::ConnectionAcquire(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::DatabasePoolTimeout)
        }
        DbErr::Conn(_) => (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::DatabaseConnection),
        DbErr::Exec(_) | DbErr::Query(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError)
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseUnhandled),
    };

    if status == StatusCode::SERVICE_UNAVAILABLE {
        tracing::warn!(error_code = code.code(), "Database unavailable: {}", error);
    } else {
        tracing::error!(error_code = code.code(), "Database error: {:?}", error);
    }

    (status, code, code.default_message().to_string(), None)
}

/// `{"field": ["message", ...]}` from validator failures.
///
/// Keys are the camelCase names clients send (`categoria_id` becomes
/// `categoriaId`). Falls back to the rule code when a rule has no message.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let fields = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<Value> = errors
                .iter()
                .map(|err| {
                    let text = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    Value::String(text)
                })
                .collect();
            (wire_name(&field), Value::Array(messages))
        })
        .collect::<serde_json::Map<_, _>>();

    Value::Object(fields)
}

/// snake_case Rust field name to the camelCase name used on the wire.
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !name.is_empty();
        } else if upper_next {
            name.extend(c.to_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// Build an error response without going through [`AppError`].
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message, None))).into_response()
}
