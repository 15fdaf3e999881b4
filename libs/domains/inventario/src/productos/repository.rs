use async_trait::async_trait;
use axum_helpers::{PageParams, PageResponse};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{CreateProducto, Producto};
use crate::categorias::{CategoriaRepository, InMemoryCategoriaRepository};
use crate::error::{Entidad, InventarioError, InventarioResult};
use crate::estado::Estado;
use crate::marcas::{InMemoryMarcaRepository, MarcaRepository};
use crate::search::contains_lowercase;

/// Data access for products, ordered by `nombre` then `id`.
///
/// Reference checks (category, brand) belong to the service; implementations
/// only enforce the unique `codigo` and non-negative stock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductoRepository: Send + Sync {
    /// Insert an active product; `DuplicateCode` when the code is taken.
    async fn create(&self, input: CreateProducto) -> InventarioResult<Producto>;

    async fn get_by_id(&self, id: i32) -> InventarioResult<Option<Producto>>;

    async fn get_by_codigo(&self, codigo: &str) -> InventarioResult<Option<Producto>>;

    async fn save(&self, producto: &Producto) -> InventarioResult<Producto>;

    async fn list(&self, estado: Option<Estado>) -> InventarioResult<Vec<Producto>>;

    async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Producto>>;

    async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Producto>>;

    async fn list_by_categoria(&self, categoria_id: i32) -> InventarioResult<Vec<Producto>>;

    async fn list_by_marca(&self, marca_id: i32) -> InventarioResult<Vec<Producto>>;

    /// Products whose category has exactly this name.
    async fn list_by_categoria_nombre(&self, nombre: &str) -> InventarioResult<Vec<Producto>>;

    /// Products whose brand has exactly this name.
    async fn list_by_marca_nombre(&self, nombre: &str) -> InventarioResult<Vec<Producto>>;

    /// Inclusive on both bounds.
    async fn list_by_precio(&self, min: Decimal, max: Decimal) -> InventarioResult<Vec<Producto>>;

    /// Products with `stock > 0`.
    async fn list_con_stock(&self) -> InventarioResult<Vec<Producto>>;

    async fn exists_by_codigo(&self, codigo: &str) -> InventarioResult<bool>;

    /// Add `delta` to the stock in one atomic step.
    ///
    /// Fails with `InsufficientStock` and leaves the row unchanged when the
    /// result would be negative.
    async fn adjust_stock(&self, id: i32, delta: i32) -> InventarioResult<Producto>;
}

/// In-memory implementation.
///
/// Name lookups read the category and brand repositories passed to [`new`](Self::new);
/// share clones of the repositories the other services use.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductoRepository {
    productos: Arc<RwLock<HashMap<i32, Producto>>>,
    categorias: InMemoryCategoriaRepository,
    marcas: InMemoryMarcaRepository,
}

impl InMemoryProductoRepository {
    pub fn new(categorias: InMemoryCategoriaRepository, marcas: InMemoryMarcaRepository) -> Self {
        Self {
            productos: Arc::default(),
            categorias,
            marcas,
        }
    }

    async fn filtered(&self, keep: impl Fn(&Producto) -> bool) -> Vec<Producto> {
        let productos = self.productos.read().await;
        let mut found: Vec<Producto> = productos.values().filter(|&p| keep(p)).cloned().collect();
        found.sort_by(|a, b| a.nombre.cmp(&b.nombre).then(a.id.cmp(&b.id)));
        found
    }
}

#[async_trait]
impl ProductoRepository for InMemoryProductoRepository {
    async fn create(&self, input: CreateProducto) -> InventarioResult<Producto> {
        let mut productos = self.productos.write().await;

        if productos.values().any(|p| p.codigo == input.codigo) {
            return Err(InventarioError::DuplicateCode(input.codigo));
        }

        let id = productos.keys().max().copied().unwrap_or(0) + 1;
        let producto = Producto::new(id, input);
        productos.insert(id, producto.clone());

        tracing::info!(producto_id = id, codigo = %producto.codigo, "Created producto");
        Ok(producto)
    }

    async fn get_by_id(&self, id: i32) -> InventarioResult<Option<Producto>> {
        Ok(self.productos.read().await.get(&id).cloned())
    }

    async fn get_by_codigo(&self, codigo: &str) -> InventarioResult<Option<Producto>> {
        let productos = self.productos.read().await;
        Ok(productos.values().find(|p| p.codigo == codigo).cloned())
    }

    async fn save(&self, producto: &Producto) -> InventarioResult<Producto> {
        let mut productos = self.productos.write().await;

        if productos
            .values()
            .any(|p| p.id != producto.id && p.codigo == producto.codigo)
        {
            return Err(InventarioError::DuplicateCode(producto.codigo.clone()));
        }

        let stored = productos
            .get_mut(&producto.id)
            .ok_or_else(|| InventarioError::not_found(Entidad::Producto, producto.id))?;
        let fecha_creacion = stored.fecha_creacion;
        *stored = Producto {
            fecha_creacion,
            ..producto.clone()
        };

        Ok(stored.clone())
    }

    async fn list(&self, estado: Option<Estado>) -> InventarioResult<Vec<Producto>> {
        Ok(self.filtered(|p| Estado::matches(estado, p.estado)).await)
    }

    async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Producto>> {
        Ok(PageResponse::from_sorted(self.filtered(|_| true).await, params))
    }

    async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Producto>> {
        Ok(self
            .filtered(|p| contains_lowercase(&p.nombre, fragment))
            .await)
    }

    async fn list_by_categoria(&self, categoria_id: i32) -> InventarioResult<Vec<Producto>> {
        Ok(self.filtered(|p| p.categoria_id == categoria_id).await)
    }

    async fn list_by_marca(&self, marca_id: i32) -> InventarioResult<Vec<Producto>> {
        Ok(self.filtered(|p| p.marca_id == marca_id).await)
    }

    async fn list_by_categoria_nombre(&self, nombre: &str) -> InventarioResult<Vec<Producto>> {
        let ids: Vec<i32> = self
            .categorias
            .list(None)
            .await?
            .into_iter()
            .filter(|c| c.nombre == nombre)
            .map(|c| c.id)
            .collect();
        Ok(self.filtered(|p| ids.contains(&p.categoria_id)).await)
    }

    async fn list_by_marca_nombre(&self, nombre: &str) -> InventarioResult<Vec<Producto>> {
        let ids: Vec<i32> = self
            .marcas
            .list(None)
            .await?
            .into_iter()
            .filter(|m| m.nombre == nombre)
            .map(|m| m.id)
            .collect();
        Ok(self.filtered(|p| ids.contains(&p.marca_id)).await)
    }

    async fn list_by_precio(&self, min: Decimal, max: Decimal) -> InventarioResult<Vec<Producto>> {
        Ok(self.filtered(|p| p.precio >= min && p.precio <= max).await)
    }

    async fn list_con_stock(&self) -> InventarioResult<Vec<Producto>> {
        Ok(self.filtered(|p| p.stock > 0).await)
    }

    async fn exists_by_codigo(&self, codigo: &str) -> InventarioResult<bool> {
        let productos = self.productos.read().await;
        Ok(productos.values().any(|p| p.codigo == codigo))
    }

    async fn adjust_stock(&self, id: i32, delta: i32) -> InventarioResult<Producto> {
        let mut productos = self.productos.write().await;
        let producto = productos
            .get_mut(&id)
            .ok_or_else(|| InventarioError::not_found(Entidad::Producto, id))?;

        let nuevo = i64::from(producto.stock) + i64::from(delta);
        if nuevo < 0 {
            return Err(InventarioError::InsufficientStock {
                disponible: producto.stock,
                solicitado: -i64::from(delta),
            });
        }
        producto.stock = i32::try_from(nuevo).map_err(|_| InventarioError::stock_overflow())?;

        tracing::info!(producto_id = id, delta, stock = producto.stock, "Adjusted stock");
        Ok(producto.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(codigo: &str, nombre: &str, stock: i32) -> CreateProducto {
        CreateProducto {
            codigo: codigo.to_string(),
            nombre: nombre.to_string(),
            descripcion: None,
            precio: Decimal::new(1000, 2),
            stock,
            categoria_id: 1,
            marca_id: 1,
        }
    }

    #[tokio::test]
    async fn test_duplicate_codigo() {
        let repo = InMemoryProductoRepository::default();
        repo.create(input("P-001", "Agua", 1)).await.unwrap();

        let result = repo.create(input("P-001", "Jugo", 1)).await;
        assert!(matches!(result, Err(InventarioError::DuplicateCode(c)) if c == "P-001"));
    }

    #[tokio::test]
    async fn test_adjust_stock_never_goes_negative() {
        let repo = InMemoryProductoRepository::default();
        let producto = repo.create(input("P-001", "Agua", 3)).await.unwrap();

        let err = repo.adjust_stock(producto.id, -5).await.unwrap_err();
        assert!(matches!(
            err,
            InventarioError::InsufficientStock {
                disponible: 3,
                solicitado: 5
            }
        ));
        assert_eq!(repo.get_by_id(producto.id).await.unwrap().unwrap().stock, 3);

        let updated = repo.adjust_stock(producto.id, -3).await.unwrap();
        assert_eq!(updated.stock, 0);
    }

    #[tokio::test]
    async fn test_concurrent_adjustments_are_serialized() {
        let repo = InMemoryProductoRepository::default();
        let producto = repo.create(input("P-001", "Agua", 10)).await.unwrap();

        let tasks: Vec<_> = (0..15)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.adjust_stock(producto.id, -1).await })
            })
            .collect();

        let mut ok = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 10);
        assert_eq!(repo.get_by_id(producto.id).await.unwrap().unwrap().stock, 0);
    }

    #[tokio::test]
    async fn test_price_range_and_stock_filters() {
        let repo = InMemoryProductoRepository::default();
        let mut barato = input("P-001", "Barato", 0);
        barato.precio = Decimal::new(500, 2);
        repo.create(barato).await.unwrap();
        repo.create(input("P-002", "Medio", 4)).await.unwrap();

        let en_rango = repo
            .list_by_precio(Decimal::new(5, 0), Decimal::new(10, 0))
            .await
            .unwrap();
        assert_eq!(en_rango.len(), 2);

        let con_stock = repo.list_con_stock().await.unwrap();
        assert_eq!(con_stock.len(), 1);
        assert_eq!(con_stock[0].codigo, "P-002");
    }

    #[tokio::test]
    async fn test_lookup_by_category_name() {
        let categorias = InMemoryCategoriaRepository::new();
        let bebidas = categorias
            .create(crate::categorias::CreateCategoria {
                nombre: "Bebidas".into(),
                descripcion: None,
            })
            .await
            .unwrap();
        let repo = InMemoryProductoRepository::new(categorias, InMemoryMarcaRepository::new());

        let mut agua = input("P-001", "Agua", 1);
        agua.categoria_id = bebidas.id;
        repo.create(agua).await.unwrap();
        let mut pan = input("P-002", "Pan", 1);
        pan.categoria_id = bebidas.id + 1;
        repo.create(pan).await.unwrap();

        let found = repo.list_by_categoria_nombre("Bebidas").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].codigo, "P-001");
        assert!(repo.list_by_categoria_nombre("bebidas").await.unwrap().is_empty());
    }
}
