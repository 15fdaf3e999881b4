//! Integer path identifier extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Single `i32` path segment, e.g. `/productos/{id}`.
///
/// A segment that is not a valid `i32` becomes a 400 `INVALID_ID` response
/// instead of axum's plain-text rejection.
///
/// ```ignore
/// async fn get_marca(IdPath(id): IdPath) -> String {
///     format!("marca {id}")
/// }
///
/// let app = Router::new().route("/marcas/{id}", get(get_marca));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidId(e.body_text()))?;

        raw.trim()
            .parse::<i32>()
            .map(IdPath)
            .map_err(|_| AppError::InvalidId(raw))
    }
}
