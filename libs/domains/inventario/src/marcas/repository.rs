use async_trait::async_trait;
use axum_helpers::{PageParams, PageResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{CreateMarca, Marca};
use crate::error::{Entidad, InventarioError, InventarioResult};
use crate::estado::Estado;
use crate::search::contains_lowercase;

/// Data access for brands, ordered by `nombre` then `id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarcaRepository: Send + Sync {
    async fn create(&self, input: CreateMarca) -> InventarioResult<Marca>;

    async fn get_by_id(&self, id: i32) -> InventarioResult<Option<Marca>>;

    async fn get_by_ids(&self, ids: &[i32]) -> InventarioResult<Vec<Marca>>;

    async fn save(&self, marca: &Marca) -> InventarioResult<Marca>;

    async fn list(&self, estado: Option<Estado>) -> InventarioResult<Vec<Marca>>;

    async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Marca>>;

    async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Marca>>;

    /// Case-insensitive substring match on `pais_origen`; rows without one never match.
    async fn search_by_pais(&self, fragment: &str) -> InventarioResult<Vec<Marca>>;

    async fn exists_by_nombre(&self, nombre: &str) -> InventarioResult<bool>;

    async fn exists_by_id(&self, id: i32) -> InventarioResult<bool>;
}

/// In-memory implementation; clones share storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMarcaRepository {
    marcas: Arc<RwLock<HashMap<i32, Marca>>>,
}

impl InMemoryMarcaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered(&self, keep: impl Fn(&Marca) -> bool) -> Vec<Marca> {
        let marcas = self.marcas.read().await;
        let mut found: Vec<Marca> = marcas.values().filter(|&m| keep(m)).cloned().collect();
        found.sort_by(|a, b| a.nombre.cmp(&b.nombre).then(a.id.cmp(&b.id)));
        found
    }
}

#[async_trait]
impl MarcaRepository for InMemoryMarcaRepository {
    async fn create(&self, input: CreateMarca) -> InventarioResult<Marca> {
        let mut marcas = self.marcas.write().await;

        if marcas.values().any(|m| m.nombre == input.nombre) {
            return Err(InventarioError::duplicate_name(Entidad::Marca, input.nombre));
        }

        let id = marcas.keys().max().copied().unwrap_or(0) + 1;
        let marca = Marca::new(id, input);
        marcas.insert(id, marca.clone());

        tracing::info!(marca_id = id, "Created marca");
        Ok(marca)
    }

    async fn get_by_id(&self, id: i32) -> InventarioResult<Option<Marca>> {
        Ok(self.marcas.read().await.get(&id).cloned())
    }

    async fn get_by_ids(&self, ids: &[i32]) -> InventarioResult<Vec<Marca>> {
        let marcas = self.marcas.read().await;
        Ok(ids.iter().filter_map(|id| marcas.get(id).cloned()).collect())
    }

    async fn save(&self, marca: &Marca) -> InventarioResult<Marca> {
        let mut marcas = self.marcas.write().await;

        if marcas
            .values()
            .any(|m| m.id != marca.id && m.nombre == marca.nombre)
        {
            return Err(InventarioError::duplicate_name(Entidad::Marca, marca.nombre.clone()));
        }

        let stored = marcas
            .get_mut(&marca.id)
            .ok_or_else(|| InventarioError::not_found(Entidad::Marca, marca.id))?;
        stored.nombre = marca.nombre.clone();
        stored.descripcion = marca.descripcion.clone();
        stored.pais_origen = marca.pais_origen.clone();
        stored.estado = marca.estado;

        Ok(stored.clone())
    }

    async fn list(&self, estado: Option<Estado>) -> InventarioResult<Vec<Marca>> {
        Ok(self.filtered(|m| Estado::matches(estado, m.estado)).await)
    }

    async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Marca>> {
        Ok(PageResponse::from_sorted(self.filtered(|_| true).await, params))
    }

    async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Marca>> {
        Ok(self
            .filtered(|m| contains_lowercase(&m.nombre, fragment))
            .await)
    }

    async fn search_by_pais(&self, fragment: &str) -> InventarioResult<Vec<Marca>> {
        Ok(self
            .filtered(|m| {
                m.pais_origen
                    .as_deref()
                    .is_some_and(|pais| contains_lowercase(pais, fragment))
            })
            .await)
    }

    async fn exists_by_nombre(&self, nombre: &str) -> InventarioResult<bool> {
        Ok(self.marcas.read().await.values().any(|m| m.nombre == nombre))
    }

    async fn exists_by_id(&self, id: i32) -> InventarioResult<bool> {
        Ok(self.marcas.read().await.contains_key(&id))
    }
}
