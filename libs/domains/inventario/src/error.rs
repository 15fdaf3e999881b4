use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use strum::Display;
use thiserror::Error;

/// Entity named in user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Entidad {
    #[strum(serialize = "categoría")]
    Categoria,
    #[strum(serialize = "marca")]
    Marca,
    #[strum(serialize = "producto")]
    Producto,
}

#[derive(Debug, Error)]
pub enum InventarioError {
    #[error("No existe {entidad} con {campo}: {valor}")]
    NotFound {
        entidad: Entidad,
        campo: &'static str,
        valor: String,
    },

    #[error("Ya existe una {entidad} con el nombre: {nombre}")]
    DuplicateName { entidad: Entidad, nombre: String },

    #[error("Ya existe un producto con el código: {0}")]
    DuplicateCode(String),

    #[error("El rango de precios no es válido")]
    InvalidRange,

    #[error(
        "No hay suficiente stock disponible (disponible: {disponible}, solicitado: {solicitado})"
    )]
    InsufficientStock { disponible: i32, solicitado: i64 },

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type InventarioResult<T> = Result<T, InventarioError>;

impl InventarioError {
    pub fn not_found(entidad: Entidad, id: i32) -> Self {
        Self::not_found_by(entidad, "id", id)
    }

    pub fn not_found_by(entidad: Entidad, campo: &'static str, valor: impl ToString) -> Self {
        Self::NotFound {
            entidad,
            campo,
            valor: valor.to_string(),
        }
    }

    pub fn duplicate_name(entidad: Entidad, nombre: impl Into<String>) -> Self {
        Self::DuplicateName {
            entidad,
            nombre: nombre.into(),
        }
    }

    /// Stock adjustment whose result does not fit the `stock` column.
    pub fn stock_overflow() -> Self {
        Self::Validation(format!(
            "El stock resultante excede el máximo permitido ({})",
            i32::MAX
        ))
    }
}

/// Turn a unique-constraint violation into `on_unique()`, keep anything else as a database error.
pub(crate) fn map_unique(err: DbErr, on_unique: impl FnOnce() -> InventarioError) -> InventarioError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => on_unique(),
        _ => InventarioError::Database(err),
    }
}

impl From<InventarioError> for AppError {
    fn from(err: InventarioError) -> Self {
        match err {
            InventarioError::NotFound { .. } => AppError::NotFound(err.to_string()),
            InventarioError::DuplicateName { .. } | InventarioError::DuplicateCode(_) => {
                AppError::Duplicate(err.to_string())
            }
            InventarioError::InvalidRange
            | InventarioError::InsufficientStock { .. }
            | InventarioError::Validation(_) => AppError::BadRequest(err.to_string()),
            InventarioError::Database(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for InventarioError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_messages() {
        assert_eq!(
            InventarioError::not_found(Entidad::Producto, 42).to_string(),
            "No existe producto con id: 42"
        );
        assert_eq!(
            InventarioError::not_found_by(Entidad::Producto, "código", "ABC").to_string(),
            "No existe producto con código: ABC"
        );
        assert_eq!(
            InventarioError::duplicate_name(Entidad::Categoria, "Bebidas").to_string(),
            "Ya existe una categoría con el nombre: Bebidas"
        );
        assert_eq!(
            InventarioError::DuplicateCode("P-001".into()).to_string(),
            "Ya existe un producto con el código: P-001"
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (InventarioError::not_found(Entidad::Marca, 1), StatusCode::NOT_FOUND),
            (
                InventarioError::duplicate_name(Entidad::Marca, "Acme"),
                StatusCode::BAD_REQUEST,
            ),
            (InventarioError::InvalidRange, StatusCode::BAD_REQUEST),
            (
                InventarioError::InsufficientStock {
                    disponible: 3,
                    solicitado: 5,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                InventarioError::Database(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_map_unique_keeps_other_errors() {
        let err = map_unique(DbErr::Custom("other".into()), || {
            InventarioError::DuplicateCode("x".into())
        });
        assert!(matches!(err, InventarioError::Database(_)));
    }
}
