use async_trait::async_trait;
use axum_helpers::{PageParams, PageResponse};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{Categoria, CreateCategoria};
use crate::error::{Entidad, InventarioError, InventarioResult};
use crate::estado::Estado;
use crate::search::contains_lowercase;

/// Data access for categories.
///
/// Listing methods return rows ordered by `nombre`, then `id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoriaRepository: Send + Sync {
    /// Insert an active category; `DuplicateName` when the name is taken.
    async fn create(&self, input: CreateCategoria) -> InventarioResult<Categoria>;

    async fn get_by_id(&self, id: i32) -> InventarioResult<Option<Categoria>>;

    /// Rows whose id is in `ids`, in no particular order.
    async fn get_by_ids(&self, ids: &[i32]) -> InventarioResult<Vec<Categoria>>;

    /// Persist every mutable field of an existing row.
    async fn save(&self, categoria: &Categoria) -> InventarioResult<Categoria>;

    async fn list(&self, estado: Option<Estado>) -> InventarioResult<Vec<Categoria>>;

    async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Categoria>>;

    /// Case-insensitive substring match on the name.
    async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Categoria>>;

    /// Exact, case-sensitive name match over active and inactive rows.
    async fn exists_by_nombre(&self, nombre: &str) -> InventarioResult<bool>;

    async fn exists_by_id(&self, id: i32) -> InventarioResult<bool>;
}

/// In-memory implementation for tests and local runs.
///
/// Clones share the same storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoriaRepository {
    categorias: Arc<RwLock<HashMap<i32, Categoria>>>,
}

impl InMemoryCategoriaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut categorias: Vec<Categoria>) -> Vec<Categoria> {
    categorias.sort_by(|a, b| a.nombre.cmp(&b.nombre).then(a.id.cmp(&b.id)));
    categorias
}

#[async_trait]
impl CategoriaRepository for InMemoryCategoriaRepository {
    async fn create(&self, input: CreateCategoria) -> InventarioResult<Categoria> {
        let mut categorias = self.categorias.write().await;

        if categorias.values().any(|c| c.nombre == input.nombre) {
            return Err(InventarioError::duplicate_name(Entidad::Categoria, input.nombre));
        }

        let id = categorias.keys().max().copied().unwrap_or(0) + 1;
        let categoria = Categoria::new(id, input);
        categorias.insert(id, categoria.clone());

        tracing::info!(categoria_id = id, "Created categoria");
        Ok(categoria)
    }

    async fn get_by_id(&self, id: i32) -> InventarioResult<Option<Categoria>> {
        let categorias = self.categorias.read().await;
        Ok(categorias.get(&id).cloned())
    }

    async fn get_by_ids(&self, ids: &[i32]) -> InventarioResult<Vec<Categoria>> {
        let categorias = self.categorias.read().await;
        Ok(ids.iter().filter_map(|id| categorias.get(id).cloned()).collect())
    }

    async fn save(&self, categoria: &Categoria) -> InventarioResult<Categoria> {
        let mut categorias = self.categorias.write().await;

        if categorias
            .values()
            .any(|c| c.id != categoria.id && c.nombre == categoria.nombre)
        {
            return Err(InventarioError::duplicate_name(
                Entidad::Categoria,
                categoria.nombre.clone(),
            ));
        }

        let stored = categorias
            .get_mut(&categoria.id)
            .ok_or_else(|| InventarioError::not_found(Entidad::Categoria, categoria.id))?;
        stored.nombre = categoria.nombre.clone();
        stored.descripcion = categoria.descripcion.clone();
        stored.estado = categoria.estado;

        Ok(stored.clone())
    }

    async fn list(&self, estado: Option<Estado>) -> InventarioResult<Vec<Categoria>> {
        let categorias = self.categorias.read().await;
        Ok(sorted(
            categorias
                .values()
                .filter(|c| Estado::matches(estado, c.estado))
                .cloned()
                .collect(),
        ))
    }

    async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Categoria>> {
        let all = self.list(None).await?;
        Ok(PageResponse::from_sorted(all, params))
    }

    async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Categoria>> {
        let categorias = self.categorias.read().await;
        Ok(sorted(
            categorias
                .values()
                .filter(|c| contains_lowercase(&c.nombre, fragment))
                .cloned()
                .collect(),
        ))
    }

    async fn exists_by_nombre(&self, nombre: &str) -> InventarioResult<bool> {
        let categorias = self.categorias.read().await;
        Ok(categorias.values().any(|c| c.nombre == nombre))
    }

    async fn exists_by_id(&self, id: i32) -> InventarioResult<bool> {
        let categorias = self.categorias.read().await;
        Ok(categorias.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(nombre: &str) -> CreateCategoria {
        CreateCategoria {
            nombre: nombre.to_string(),
            descripcion: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryCategoriaRepository::new();
        let a = repo.create(input("Bebidas")).await.unwrap();
        let b = repo.create(input("Snacks")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(b.estado, Estado::Activo);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let repo = InMemoryCategoriaRepository::new();
        repo.create(input("Bebidas")).await.unwrap();

        let result = repo.create(input("Bebidas")).await;
        assert!(matches!(result, Err(InventarioError::DuplicateName { .. })));
    }

    #[tokio::test]
    async fn test_list_sorted_and_filtered() {
        let repo = InMemoryCategoriaRepository::new();
        repo.create(input("Snacks")).await.unwrap();
        let mut bebidas = repo.create(input("Bebidas")).await.unwrap();
        bebidas.estado = Estado::Inactivo;
        repo.save(&bebidas).await.unwrap();

        let all = repo.list(None).await.unwrap();
        assert_eq!(all[0].nombre, "Bebidas");
        assert_eq!(all[1].nombre, "Snacks");

        let activas = repo.list(Some(Estado::Activo)).await.unwrap();
        assert_eq!(activas.len(), 1);
        assert_eq!(activas[0].nombre, "Snacks");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let repo = InMemoryCategoriaRepository::new();
        repo.create(input("Electrodomésticos")).await.unwrap();
        repo.create(input("Bebidas")).await.unwrap();

        let found = repo.search_by_nombre("ELECTRO").await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(repo.exists_by_nombre("Bebidas").await.unwrap());
        assert!(!repo.exists_by_nombre("bebidas").await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryCategoriaRepository::new();
        let clone = repo.clone();
        let created = repo.create(input("Bebidas")).await.unwrap();

        assert!(clone.exists_by_id(created.id).await.unwrap());
        assert_eq!(clone.get_by_ids(&[created.id, 99]).await.unwrap().len(), 1);
    }
}
