use async_trait::async_trait;
use axum_helpers::{PageParams, PageResponse};
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use super::entity;
use super::models::{CreateMarca, Marca};
use super::repository::MarcaRepository;
use crate::error::{Entidad, InventarioError, InventarioResult, map_unique};
use crate::estado::Estado;
use crate::search::contains_ignore_case;

#[derive(Clone)]
pub struct PgMarcaRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgMarcaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn fetch(&self, query: Select<entity::Entity>) -> InventarioResult<Vec<Marca>> {
        let models = query
            .order_by_asc(entity::Column::Nombre)
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl MarcaRepository for PgMarcaRepository {
    async fn create(&self, input: CreateMarca) -> InventarioResult<Marca> {
        let nombre = input.nombre.clone();
        let model = self
            .base
            .insert(entity::ActiveModel::from(input))
            .await
            .map_err(|e| map_unique(e, || InventarioError::duplicate_name(Entidad::Marca, nombre)))?;

        tracing::info!(marca_id = model.id, "Created marca");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> InventarioResult<Option<Marca>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn get_by_ids(&self, ids: &[i32]) -> InventarioResult<Vec<Marca>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch(entity::Entity::find().filter(entity::Column::Id.is_in(ids.iter().copied())))
            .await
    }

    async fn save(&self, marca: &Marca) -> InventarioResult<Marca> {
        let model = self
            .base
            .update(entity::ActiveModel::from(marca))
            .await
            .map_err(|e| {
                map_unique(e, || {
                    InventarioError::duplicate_name(Entidad::Marca, marca.nombre.clone())
                })
            })?;

        tracing::info!(marca_id = model.id, activo = model.activo, "Saved marca");
        Ok(model.into())
    }

    async fn list(&self, estado: Option<Estado>) -> InventarioResult<Vec<Marca>> {
        let query = match estado {
            Some(estado) => {
                entity::Entity::find().filter(entity::Column::Activo.eq(estado.is_activo()))
            }
            None => entity::Entity::find(),
        };
        self.fetch(query).await
    }

    async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Marca>> {
        let paginator = entity::Entity::find()
            .order_by_asc(entity::Column::Nombre)
            .order_by_asc(entity::Column::Id)
            .paginate(self.base.db(), params.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page).await?;

        Ok(PageResponse::new(
            models.into_iter().map(Into::into).collect(),
            params,
            total,
        ))
    }

    async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Marca>> {
        self.fetch(entity::Entity::find().filter(contains_ignore_case("marcas", "nombre", fragment)))
            .await
    }

    async fn search_by_pais(&self, fragment: &str) -> InventarioResult<Vec<Marca>> {
        self.fetch(
            entity::Entity::find().filter(contains_ignore_case("marcas", "pais_origen", fragment)),
        )
        .await
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

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model(id: i32, nombre: &str) -> entity::Model {
        entity::Model {
            id,
            nombre: nombre.to_string(),
            descripcion: None,
            pais_origen: Some("Perú".to_string()),
            activo: true,
            fecha_creacion: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(4, "Gloria")]])
            .into_connection();
        let repo = PgMarcaRepository::new(db);

        let marca = repo.get_by_id(4).await.unwrap().unwrap();
        assert_eq!(marca.nombre, "Gloria");
        assert_eq!(marca.estado, Estado::Activo);
    }

    #[tokio::test]
    async fn test_get_by_ids_empty_skips_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PgMarcaRepository::new(db);

        assert!(repo.get_by_ids(&[]).await.unwrap().is_empty());
    }
}
