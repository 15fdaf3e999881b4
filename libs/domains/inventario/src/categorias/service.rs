use axum_helpers::{PageParams, PageResponse};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use super::models::{Categoria, CategoriaSimple, CreateCategoria, UpdateCategoria};
use super::repository::CategoriaRepository;
use crate::error::{Entidad, InventarioError, InventarioResult};
use crate::estado::Estado;

/// Business rules for categories.
#[derive(Clone)]
pub struct CategoriaService<R: CategoriaRepository> {
    repository: Arc<R>,
}

impl<R: CategoriaRepository> CategoriaService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a category; the name must not be used by any row, active or not.
    #[instrument(skip(self, input), fields(nombre = %input.nombre))]
    pub async fn create(&self, input: CreateCategoria) -> InventarioResult<Categoria> {
        input
            .validate()
            .map_err(|e| InventarioError::Validation(e.to_string()))?;

        if self.repository.exists_by_nombre(&input.nombre).await? {
            return Err(InventarioError::duplicate_name(Entidad::Categoria, input.nombre));
        }

        self.repository.create(input).await
    }

    pub async fn get_by_id(&self, id: i32) -> InventarioResult<Categoria> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| InventarioError::not_found(Entidad::Categoria, id))
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateCategoria) -> InventarioResult<Categoria> {
        input
            .validate()
            .map_err(|e| InventarioError::Validation(e.to_string()))?;

        let mut categoria = self.get_by_id(id).await?;

        if let Some(nombre) = &input.nombre {
            if *nombre != categoria.nombre && self.repository.exists_by_nombre(nombre).await? {
                return Err(InventarioError::duplicate_name(Entidad::Categoria, nombre.clone()));
            }
        }

        categoria.apply_update(input);
        self.repository.save(&categoria).await
    }

    /// Soft delete. Products referencing the category are left untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> InventarioResult<()> {
        let mut categoria = self.get_by_id(id).await?;

        if categoria.estado.is_activo() {
            categoria.estado = Estado::Inactivo;
            self.repository.save(&categoria).await?;
            tracing::info!(categoria_id = id, "Deactivated categoria");
        }

        Ok(())
    }

    pub async fn list(&self) -> InventarioResult<Vec<Categoria>> {
        self.repository.list(None).await
    }

    pub async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Categoria>> {
        self.repository.list_paged(params).await
    }

    pub async fn list_active_simple(&self) -> InventarioResult<Vec<CategoriaSimple>> {
        let activas = self.repository.list(Some(Estado::Activo)).await?;
        Ok(activas.into_iter().map(CategoriaSimple::from).collect())
    }

    pub async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Categoria>> {
        self.repository.search_by_nombre(fragment).await
    }

    pub async fn exists_by_nombre(&self, nombre: &str) -> InventarioResult<bool> {
        self.repository.exists_by_nombre(nombre).await
    }
}
