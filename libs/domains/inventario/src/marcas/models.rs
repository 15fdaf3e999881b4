use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::estado::Estado;
use crate::validation::not_blank;

#[derive(Debug, Clone, PartialEq)]
pub struct Marca {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub pais_origen: Option<String>,
    pub estado: Estado,
    pub fecha_creacion: DateTime<Utc>,
}

impl Marca {
    pub fn new(id: i32, input: CreateMarca) -> Self {
        Self {
            id,
            nombre: input.nombre,
            descripcion: input.descripcion,
            pais_origen: input.pais_origen,
            estado: Estado::Activo,
            fecha_creacion: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, input: UpdateMarca) {
        if let Some(nombre) = input.nombre {
            self.nombre = nombre;
        }
        if let Some(descripcion) = input.descripcion {
            self.descripcion = Some(descripcion);
        }
        if let Some(pais_origen) = input.pais_origen {
            self.pais_origen = Some(pais_origen);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMarca {
    #[validate(
        custom(function = "not_blank", message = "El nombre es obligatorio"),
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres")
    )]
    #[schema(example = "Acme")]
    pub nombre: String,

    #[validate(length(max = 255, message = "La descripción no debe exceder los 255 caracteres"))]
    pub descripcion: Option<String>,

    #[validate(length(max = 100, message = "El país de origen no debe exceder los 100 caracteres"))]
    #[schema(example = "Perú")]
    pub pais_origen: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMarca {
    #[validate(
        custom(function = "not_blank", message = "El nombre es obligatorio"),
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres")
    )]
    pub nombre: Option<String>,

    #[validate(length(max = 255, message = "La descripción no debe exceder los 255 caracteres"))]
    pub descripcion: Option<String>,

    #[validate(length(max = 100, message = "El país de origen no debe exceder los 100 caracteres"))]
    pub pais_origen: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarcaResponse {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub pais_origen: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
}

impl From<Marca> for MarcaResponse {
    fn from(marca: Marca) -> Self {
        Self {
            id: marca.id,
            nombre: marca.nombre,
            descripcion: marca.descripcion,
            pais_origen: marca.pais_origen,
            activo: marca.estado.is_activo(),
            fecha_creacion: marca.fecha_creacion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MarcaSimple {
    pub id: i32,
    pub nombre: String,
}

impl From<Marca> for MarcaSimple {
    fn from(marca: Marca) -> Self {
        Self {
            id: marca.id,
            nombre: marca.nombre,
        }
    }
}

/// `?paisOrigen=`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaisQuery {
    /// Country name or fragment
    pub pais_origen: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_update_keeps_absent_fields() {
        let mut marca = Marca::new(
            1,
            CreateMarca {
                nombre: "Acme".into(),
                descripcion: None,
                pais_origen: Some("Perú".into()),
            },
        );

        marca.apply_update(UpdateMarca {
            descripcion: Some("Herramientas".into()),
            ..Default::default()
        });

        assert_eq!(marca.nombre, "Acme");
        assert_eq!(marca.pais_origen.as_deref(), Some("Perú"));
        assert_eq!(marca.descripcion.as_deref(), Some("Herramientas"));
    }

    #[test]
    fn test_pais_origen_length() {
        let input = CreateMarca {
            nombre: "Acme".into(),
            descripcion: None,
            pais_origen: Some("p".repeat(101)),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("pais_origen"));
    }

    #[test]
    fn test_pais_query_reads_camel_case() {
        let query: PaisQuery = serde_json::from_str(r#"{"paisOrigen": "Chile"}"#).unwrap();
        assert_eq!(query.pais_origen, "Chile");
    }
}
