use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::estado::Estado;
use crate::validation::not_blank;

#[derive(Debug, Clone, PartialEq)]
pub struct Categoria {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub estado: Estado,
    pub fecha_creacion: DateTime<Utc>,
}

impl Categoria {
    pub fn new(id: i32, input: CreateCategoria) -> Self {
        Self {
            id,
            nombre: input.nombre,
            descripcion: input.descripcion,
            estado: Estado::Activo,
            fecha_creacion: Utc::now(),
        }
    }

    /// Overwrite the fields present in `input`; `id`, `estado` and `fecha_creacion` never change here.
    pub fn apply_update(&mut self, input: UpdateCategoria) {
        if let Some(nombre) = input.nombre {
            self.nombre = nombre;
        }
        if let Some(descripcion) = input.descripcion {
            self.descripcion = Some(descripcion);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoria {
    #[validate(
        custom(function = "not_blank", message = "El nombre es obligatorio"),
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres")
    )]
    #[schema(example = "Bebidas")]
    pub nombre: String,

    #[validate(length(max = 255, message = "La descripción no debe exceder los 255 caracteres"))]
    pub descripcion: Option<String>,
}

/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoria {
    #[validate(
        custom(function = "not_blank", message = "El nombre es obligatorio"),
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres")
    )]
    pub nombre: Option<String>,

    #[validate(length(max = 255, message = "La descripción no debe exceder los 255 caracteres"))]
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaResponse {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
}

impl From<Categoria> for CategoriaResponse {
    fn from(categoria: Categoria) -> Self {
        Self {
            id: categoria.id,
            nombre: categoria.nombre,
            descripcion: categoria.descripcion,
            activo: categoria.estado.is_activo(),
            fecha_creacion: categoria.fecha_creacion,
        }
    }
}

/// `{id, nombre}` for dropdowns and embedding in product responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoriaSimple {
    pub id: i32,
    pub nombre: String,
}

impl From<Categoria> for CategoriaSimple {
    fn from(categoria: Categoria) -> Self {
        Self {
            id: categoria.id,
            nombre: categoria.nombre,
        }
    }
}
