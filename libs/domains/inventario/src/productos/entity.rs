use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use super::models::{CreateProducto, Producto, escala_precio};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "productos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub codigo: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub precio: Decimal,
    pub stock: i32,
    pub categoria_id: i32,
    pub marca_id: i32,
    pub activo: bool,
    pub fecha_creacion: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::categorias::entity::Entity",
        from = "Column::CategoriaId",
        to = "crate::categorias::entity::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Categoria,
    #[sea_orm(
        belongs_to = "crate::marcas::entity::Entity",
        from = "Column::MarcaId",
        to = "crate::marcas::entity::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Marca,
}

impl Related<crate::categorias::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categoria.def()
    }
}

impl Related<crate::marcas::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marca.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Producto {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            codigo: model.codigo,
            nombre: model.nombre,
            descripcion: model.descripcion,
            precio: model.precio,
            stock: model.stock,
            categoria_id: model.categoria_id,
            marca_id: model.marca_id,
            estado: model.activo.into(),
            fecha_creacion: model.fecha_creacion.into(),
        }
    }
}

impl From<CreateProducto> for ActiveModel {
    fn from(input: CreateProducto) -> Self {
        ActiveModel {
            id: NotSet,
            codigo: Set(input.codigo),
            nombre: Set(input.nombre),
            descripcion: Set(input.descripcion),
            precio: Set(escala_precio(input.precio)),
            stock: Set(input.stock),
            categoria_id: Set(input.categoria_id),
            marca_id: Set(input.marca_id),
            activo: Set(true),
            fecha_creacion: Set(chrono::Utc::now().into()),
        }
    }
}

// fecha_creacion is never rewritten
impl From<&Producto> for ActiveModel {
    fn from(producto: &Producto) -> Self {
        ActiveModel {
            id: Unchanged(producto.id),
            codigo: Set(producto.codigo.clone()),
            nombre: Set(producto.nombre.clone()),
            descripcion: Set(producto.descripcion.clone()),
            precio: Set(producto.precio),
            stock: Set(producto.stock),
            categoria_id: Set(producto.categoria_id),
            marca_id: Set(producto.marca_id),
            activo: Set(producto.estado.is_activo()),
            fecha_creacion: NotSet,
        }
    }
}
