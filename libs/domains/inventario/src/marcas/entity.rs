use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use super::models::{CreateMarca, Marca};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "marcas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub nombre: String,
    pub descripcion: Option<String>,
    pub pais_origen: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::productos::entity::Entity")]
    Productos,
}

impl Related<crate::productos::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Productos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Marca {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nombre: model.nombre,
            descripcion: model.descripcion,
            pais_origen: model.pais_origen,
            estado: model.activo.into(),
            fecha_creacion: model.fecha_creacion.into(),
        }
    }
}

impl From<CreateMarca> for ActiveModel {
    fn from(input: CreateMarca) -> Self {
        ActiveModel {
            id: NotSet,
            nombre: Set(input.nombre),
            descripcion: Set(input.descripcion),
            pais_origen: Set(input.pais_origen),
            activo: Set(true),
            fecha_creacion: Set(chrono::Utc::now().into()),
        }
    }
}

impl From<&Marca> for ActiveModel {
    fn from(marca: &Marca) -> Self {
        ActiveModel {
            id: Unchanged(marca.id),
            nombre: Set(marca.nombre.clone()),
            descripcion: Set(marca.descripcion.clone()),
            pais_origen: Set(marca.pais_origen.clone()),
            activo: Set(marca.estado.is_activo()),
            fecha_creacion: NotSet,
        }
    }
}
