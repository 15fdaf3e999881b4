use async_trait::async_trait;
use axum_helpers::{PageParams, PageResponse};
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use super::entity;
use super::models::{Categoria, CreateCategoria};
use super::repository::CategoriaRepository;
use crate::error::{Entidad, InventarioError, InventarioResult, map_unique};
use crate::estado::Estado;
use crate::search::contains_ignore_case;

#[derive(Clone)]
pub struct PgCategoriaRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgCategoriaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn ordered(query: Select<entity::Entity>) -> Select<entity::Entity> {
        query
            .order_by_asc(entity::Column::Nombre)
            .order_by_asc(entity::Column::Id)
    }
}

#[async_trait]
impl CategoriaRepository for PgCategoriaRepository {
    async fn create(&self, input: CreateCategoria) -> InventarioResult<Categoria> {
        let nombre = input.nombre.clone();
        let model = self
            .base
            .insert(entity::ActiveModel::from(input))
            .await
            .map_err(|e| map_unique(e, || InventarioError::duplicate_name(Entidad::Categoria, nombre)))?;

        tracing::info!(categoria_id = model.id, "Created categoria");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> InventarioResult<Option<Categoria>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn get_by_ids(&self, ids: &[i32]) -> InventarioResult<Vec<Categoria>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = entity::Entity::find()
            .filter(entity::Column::Id.is_in(ids.iter().copied()))
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn save(&self, categoria: &Categoria) -> InventarioResult<Categoria> {
        let model = self
            .base
            .update(entity::ActiveModel::from(categoria))
            .await
            .map_err(|e| {
                map_unique(e, || {
                    InventarioError::duplicate_name(Entidad::Categoria, categoria.nombre.clone())
                })
            })?;

        tracing::info!(categoria_id = model.id, activo = model.activo, "Saved categoria");
        Ok(model.into())
    }

    async fn list(&self, estado: Option<Estado>) -> InventarioResult<Vec<Categoria>> {
        let mut query = entity::Entity::find();
        if let Some(estado) = estado {
            query = query.filter(entity::Column::Activo.eq(estado.is_activo()));
        }

        let models = Self::ordered(query).all(self.base.db()).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Categoria>> {
        let paginator = Self::ordered(entity::Entity::find()).paginate(self.base.db(), params.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page).await?;

        Ok(PageResponse::new(
            models.into_iter().map(Into::into).collect(),
            params,
            total,
        ))
    }

    async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Categoria>> {
        let models = Self::ordered(
            entity::Entity::find().filter(contains_ignore_case("categorias", "nombre", fragment)),
        )
        .all(self.base.db())
        .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn exists_by_nombre(&self, nombre: &str) -> InventarioResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Nombre.eq(nombre))
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_id(&self, id: i32) -> InventarioResult<bool> {
        Ok(self.base.exists_by_id(id).await?)
    }
}
