use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
    )
}

pub async fn method_not_allowed() -> Response {
    let code = ErrorCode::MethodNotAllowed;
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        code.default_message().to_string(),
        code,
    )
}
