use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use super::models::{Categoria, CreateCategoria};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categorias")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub nombre: String,
    pub descripcion: Option<String>,
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

impl From<Model> for Categoria {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            nombre: model.nombre,
            descripcion: model.descripcion,
            estado: model.activo.into(),
            fecha_creacion: model.fecha_creacion.into(),
        }
    }
}

impl From<CreateCategoria> for ActiveModel {
    fn from(input: CreateCategoria) -> Self {
        ActiveModel {
            id: NotSet,
            nombre: Set(input.nombre),
            descripcion: Set(input.descripcion),
            activo: Set(true),
            fecha_creacion: Set(chrono::Utc::now().into()),
        }
    }
}

// fecha_creacion is left out so a save never rewrites it
impl From<&Categoria> for ActiveModel {
    fn from(categoria: &Categoria) -> Self {
        ActiveModel {
            id: Unchanged(categoria.id),
            nombre: Set(categoria.nombre.clone()),
            descripcion: Set(categoria.descripcion.clone()),
            activo: Set(categoria.estado.is_activo()),
            fecha_creacion: NotSet,
        }
    }
}
