use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::categorias::CategoriaSimple;
use crate::estado::Estado;
use crate::marcas::MarcaSimple;
use crate::validation::{not_blank, precio_valido};

#[derive(Debug, Clone, PartialEq)]
pub struct Producto {
    pub id: i32,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
    pub stock: i32,
    pub categoria_id: i32,
    pub marca_id: i32,
    pub estado: Estado,
    pub fecha_creacion: DateTime<Utc>,
}

/// Round to the two decimals the `precio` column stores.
pub(crate) fn escala_precio(precio: Decimal) -> Decimal {
    let mut precio = precio.round_dp(2);
    precio.rescale(2);
    precio
}

impl Producto {
    pub fn new(id: i32, input: CreateProducto) -> Self {
        Self {
            id,
            codigo: input.codigo,
            nombre: input.nombre,
            descripcion: input.descripcion,
            precio: escala_precio(input.precio),
            stock: input.stock,
            categoria_id: input.categoria_id,
            marca_id: input.marca_id,
            estado: Estado::Activo,
            fecha_creacion: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, input: UpdateProducto) {
        if let Some(codigo) = input.codigo {
            self.codigo = codigo;
        }
        if let Some(nombre) = input.nombre {
            self.nombre = nombre;
        }
        if let Some(descripcion) = input.descripcion {
            self.descripcion = Some(descripcion);
        }
        if let Some(precio) = input.precio {
            self.precio = escala_precio(precio);
        }
        if let Some(stock) = input.stock {
            self.stock = stock;
        }
        if let Some(categoria_id) = input.categoria_id {
            self.categoria_id = categoria_id;
        }
        if let Some(marca_id) = input.marca_id {
            self.marca_id = marca_id;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProducto {
    #[validate(
        custom(function = "not_blank", message = "El código es obligatorio"),
        length(min = 3, max = 50, message = "El código debe tener entre 3 y 50 caracteres")
    )]
    #[schema(example = "BEB-001")]
    pub codigo: String,

    #[validate(
        custom(function = "not_blank", message = "El nombre es obligatorio"),
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres")
    )]
    pub nombre: String,

    #[validate(length(max = 255, message = "La descripción no debe exceder los 255 caracteres"))]
    pub descripcion: Option<String>,

    #[validate(custom(function = "precio_valido"))]
    #[schema(value_type = String, example = "19.90")]
    pub precio: Decimal,

    #[validate(range(min = 0, message = "El stock no puede ser negativo"))]
    pub stock: i32,

    pub categoria_id: i32,
    pub marca_id: i32,
}

/// Absent fields keep their stored value; category and brand are re-checked on every update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProducto {
    #[validate(
        custom(function = "not_blank", message = "El código es obligatorio"),
        length(min = 3, max = 50, message = "El código debe tener entre 3 y 50 caracteres")
    )]
    pub codigo: Option<String>,

    #[validate(
        custom(function = "not_blank", message = "El nombre es obligatorio"),
        length(min = 2, max = 100, message = "El nombre debe tener entre 2 y 100 caracteres")
    )]
    pub nombre: Option<String>,

    #[validate(length(max = 255, message = "La descripción no debe exceder los 255 caracteres"))]
    pub descripcion: Option<String>,

    #[validate(custom(function = "precio_valido"))]
    #[schema(value_type = Option<String>)]
    pub precio: Option<Decimal>,

    #[validate(range(min = 0, message = "El stock no puede ser negativo"))]
    pub stock: Option<i32>,

    pub categoria_id: Option<i32>,
    pub marca_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductoResponse {
    pub id: i32,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[schema(value_type = String, example = "19.90")]
    pub precio: Decimal,
    pub stock: i32,
    pub categoria: Option<CategoriaSimple>,
    pub marca: Option<MarcaSimple>,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
}

impl ProductoResponse {
    pub fn new(
        producto: Producto,
        categoria: Option<CategoriaSimple>,
        marca: Option<MarcaSimple>,
    ) -> Self {
        Self {
            id: producto.id,
            codigo: producto.codigo,
            nombre: producto.nombre,
            descripcion: producto.descripcion,
            precio: producto.precio,
            stock: producto.stock,
            categoria,
            marca,
            activo: producto.estado.is_activo(),
            fecha_creacion: producto.fecha_creacion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductoSimple {
    pub id: i32,
    pub codigo: String,
    pub nombre: String,
    #[schema(value_type = String)]
    pub precio: Decimal,
    pub stock: i32,
}

impl From<Producto> for ProductoSimple {
    fn from(producto: Producto) -> Self {
        Self {
            id: producto.id,
            codigo: producto.codigo,
            nombre: producto.nombre,
            precio: producto.precio,
            stock: producto.stock,
        }
    }
}

/// `?codigo=`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CodigoQuery {
    pub codigo: String,
}

/// `?precioMin=&precioMax=`; both bounds are required by the service, inclusive.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RangoPrecioQuery {
    #[param(value_type = Option<String>)]
    pub precio_min: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub precio_max: Option<Decimal>,
}

/// `?cantidad=`, positive to add stock, negative to remove it.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CantidadQuery {
    pub cantidad: i32,
}
