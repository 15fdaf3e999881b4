use axum_helpers::{PageParams, PageResponse};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use super::models::{CreateProducto, Producto, ProductoResponse, ProductoSimple, UpdateProducto};
use super::repository::ProductoRepository;
use crate::categorias::{CategoriaRepository, CategoriaSimple};
use crate::error::{Entidad, InventarioError, InventarioResult};
use crate::estado::Estado;
use crate::marcas::{MarcaRepository, MarcaSimple};

/// Business rules for products.
///
/// Holds the category and brand repositories to check references on writes
/// and to embed `{id, nombre}` of each in responses.
#[derive(Clone)]
pub struct ProductoService<P, C, M>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    productos: Arc<P>,
    categorias: Arc<C>,
    marcas: Arc<M>,
}

impl<P, C, M> ProductoService<P, C, M>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    pub fn new(productos: P, categorias: C, marcas: M) -> Self {
        Self {
            productos: Arc::new(productos),
            categorias: Arc::new(categorias),
            marcas: Arc::new(marcas),
        }
    }

    /// Checks run in order: code, category, brand. Nothing is written if one fails.
    #[instrument(skip(self, input), fields(codigo = %input.codigo))]
    pub async fn create(&self, input: CreateProducto) -> InventarioResult<ProductoResponse> {
        input
            .validate()
            .map_err(|e| InventarioError::Validation(e.to_string()))?;

        if self.productos.exists_by_codigo(&input.codigo).await? {
            return Err(InventarioError::DuplicateCode(input.codigo));
        }
        self.ensure_references(input.categoria_id, input.marca_id)
            .await?;

        let producto = self.productos.create(input).await?;
        self.to_response(producto).await
    }

    pub async fn get_by_id(&self, id: i32) -> InventarioResult<ProductoResponse> {
        let producto = self.find(id).await?;
        self.to_response(producto).await
    }

    /// Partial update. Category and brand are re-validated even when unchanged.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateProducto) -> InventarioResult<ProductoResponse> {
        input
            .validate()
            .map_err(|e| InventarioError::Validation(e.to_string()))?;

        let mut producto = self.find(id).await?;

        if let Some(codigo) = &input.codigo {
            if *codigo != producto.codigo && self.productos.exists_by_codigo(codigo).await? {
                return Err(InventarioError::DuplicateCode(codigo.clone()));
            }
        }

        let categoria_id = input.categoria_id.unwrap_or(producto.categoria_id);
        let marca_id = input.marca_id.unwrap_or(producto.marca_id);
        self.ensure_references(categoria_id, marca_id).await?;

        producto.apply_update(input);
        let saved = self.productos.save(&producto).await?;
        self.to_response(saved).await
    }

    /// Soft delete; idempotent.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> InventarioResult<()> {
        let mut producto = self.find(id).await?;
        if producto.estado.is_activo() {
            producto.estado = Estado::Inactivo;
            self.productos.save(&producto).await?;
            tracing::info!(producto_id = id, "Deactivated producto");
        }
        Ok(())
    }

    pub async fn list(&self) -> InventarioResult<Vec<ProductoResponse>> {
        let productos = self.productos.list(None).await?;
        self.to_responses(productos).await
    }

    pub async fn list_paged(
        &self,
        params: PageParams,
    ) -> InventarioResult<PageResponse<ProductoResponse>> {
        let page = self.productos.list_paged(params).await?;
        let total = page.total_elements;
        let content = self.to_responses(page.content).await?;
        Ok(PageResponse::new(content, params, total))
    }

    pub async fn list_active_simple(&self) -> InventarioResult<Vec<ProductoSimple>> {
        let activos = self.productos.list(Some(Estado::Activo)).await?;
        Ok(activos.into_iter().map(ProductoSimple::from).collect())
    }

    pub async fn find_by_codigo(&self, codigo: &str) -> InventarioResult<ProductoResponse> {
        let producto = self
            .productos
            .get_by_codigo(codigo)
            .await?
            .ok_or_else(|| InventarioError::not_found_by(Entidad::Producto, "código", codigo))?;
        self.to_response(producto).await
    }

    pub async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<ProductoResponse>> {
        let productos = self.productos.search_by_nombre(fragment).await?;
        self.to_responses(productos).await
    }

    pub async fn find_by_categoria(
        &self,
        categoria_id: i32,
    ) -> InventarioResult<Vec<ProductoResponse>> {
        if !self.categorias.exists_by_id(categoria_id).await? {
            return Err(InventarioError::not_found(Entidad::Categoria, categoria_id));
        }
        let productos = self.productos.list_by_categoria(categoria_id).await?;
        self.to_responses(productos).await
    }

    pub async fn find_by_marca(&self, marca_id: i32) -> InventarioResult<Vec<ProductoResponse>> {
        if !self.marcas.exists_by_id(marca_id).await? {
            return Err(InventarioError::not_found(Entidad::Marca, marca_id));
        }
        let productos = self.productos.list_by_marca(marca_id).await?;
        self.to_responses(productos).await
    }

    pub async fn find_by_categoria_nombre(
        &self,
        nombre: &str,
    ) -> InventarioResult<Vec<ProductoResponse>> {
        let productos = self.productos.list_by_categoria_nombre(nombre).await?;
        self.to_responses(productos).await
    }

    pub async fn find_by_marca_nombre(&self, nombre: &str) -> InventarioResult<Vec<ProductoResponse>> {
        let productos = self.productos.list_by_marca_nombre(nombre).await?;
        self.to_responses(productos).await
    }

    /// Both bounds are required and inclusive; `min > max` is rejected.
    pub async fn find_by_precio_range(
        &self,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> InventarioResult<Vec<ProductoResponse>> {
        let (Some(min), Some(max)) = (min, max) else {
            return Err(InventarioError::InvalidRange);
        };
        if min > max {
            return Err(InventarioError::InvalidRange);
        }

        let productos = self.productos.list_by_precio(min, max).await?;
        self.to_responses(productos).await
    }

    pub async fn find_with_stock(&self) -> InventarioResult<Vec<ProductoResponse>> {
        let productos = self.productos.list_con_stock().await?;
        self.to_responses(productos).await
    }

    pub async fn exists_by_codigo(&self, codigo: &str) -> InventarioResult<bool> {
        self.productos.exists_by_codigo(codigo).await
    }

    /// Add `cantidad` (possibly negative) to the stock.
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: i32, cantidad: i32) -> InventarioResult<ProductoResponse> {
        let producto = self.find(id).await?;

        let nuevo = i64::from(producto.stock) + i64::from(cantidad);
        if nuevo < 0 {
            return Err(InventarioError::InsufficientStock {
                disponible: producto.stock,
                solicitado: -i64::from(cantidad),
            });
        }
        if nuevo > i64::from(i32::MAX) {
            return Err(InventarioError::stock_overflow());
        }

        let updated = self.productos.adjust_stock(id, cantidad).await?;
        self.to_response(updated).await
    }

    async fn find(&self, id: i32) -> InventarioResult<Producto> {
        self.productos
            .get_by_id(id)
            .await?
            .ok_or_else(|| InventarioError::not_found(Entidad::Producto, id))
    }

    async fn ensure_references(&self, categoria_id: i32, marca_id: i32) -> InventarioResult<()> {
        if !self.categorias.exists_by_id(categoria_id).await? {
            return Err(InventarioError::not_found(Entidad::Categoria, categoria_id));
        }
        if !self.marcas.exists_by_id(marca_id).await? {
            return Err(InventarioError::not_found(Entidad::Marca, marca_id));
        }
        Ok(())
    }

    async fn to_response(&self, producto: Producto) -> InventarioResult<ProductoResponse> {
        let id = producto.id;
        self.to_responses(vec![producto])
            .await?
            .pop()
            .ok_or_else(|| InventarioError::not_found(Entidad::Producto, id))
    }

    /// One lookup per related table for the whole batch.
    async fn to_responses(&self, productos: Vec<Producto>) -> InventarioResult<Vec<ProductoResponse>> {
        if productos.is_empty() {
            return Ok(Vec::new());
        }

        let categoria_ids: Vec<i32> = productos
            .iter()
            .map(|p| p.categoria_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let marca_ids: Vec<i32> = productos
            .iter()
            .map(|p| p.marca_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let categorias: HashMap<i32, CategoriaSimple> = self
            .categorias
            .get_by_ids(&categoria_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, CategoriaSimple::from(c)))
            .collect();
        let marcas: HashMap<i32, MarcaSimple> = self
            .marcas
            .get_by_ids(&marca_ids)
            .await?
            .into_iter()
            .map(|m| (m.id, MarcaSimple::from(m)))
            .collect();

        Ok(productos
            .into_iter()
            .map(|p| {
                let categoria = categorias.get(&p.categoria_id).cloned();
                let marca = marcas.get(&p.marca_id).cloned();
                ProductoResponse::new(p, categoria, marca)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorias::Categoria;
    use crate::categorias::repository::MockCategoriaRepository;
    use crate::marcas::Marca;
    use crate::marcas::repository::MockMarcaRepository;
    use crate::productos::repository::MockProductoRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    type Service = ProductoService<MockProductoRepository, MockCategoriaRepository, MockMarcaRepository>;

    fn producto(id: i32, stock: i32) -> Producto {
        Producto {
            id,
            codigo: format!("P-{id:03}"),
            nombre: "Agua".into(),
            descripcion: None,
            precio: Decimal::new(150, 2),
            stock,
            categoria_id: 1,
            marca_id: 2,
            estado: Estado::Activo,
            fecha_creacion: Utc::now(),
        }
    }

    fn create_input() -> CreateProducto {
        CreateProducto {
            codigo: "P-001".into(),
            nombre: "Agua".into(),
            descripcion: None,
            precio: Decimal::new(150, 2),
            stock: 5,
            categoria_id: 1,
            marca_id: 2,
        }
    }

    fn references() -> (MockCategoriaRepository, MockMarcaRepository) {
        let mut categorias = MockCategoriaRepository::new();
        categorias.expect_get_by_ids().returning(|ids| {
            Ok(ids
                .iter()
                .map(|&id| Categoria {
                    id,
                    nombre: "Bebidas".into(),
                    descripcion: None,
                    estado: Estado::Activo,
                    fecha_creacion: Utc::now(),
                })
                .collect())
        });
        let mut marcas = MockMarcaRepository::new();
        marcas.expect_get_by_ids().returning(|ids| {
            Ok(ids
                .iter()
                .map(|&id| Marca {
                    id,
                    nombre: "Cielo".into(),
                    descripcion: None,
                    pais_origen: None,
                    estado: Estado::Activo,
                    fecha_creacion: Utc::now(),
                })
                .collect())
        });
        (categorias, marcas)
    }

    #[tokio::test]
    async fn test_create_checks_code_first() {
        let mut productos = MockProductoRepository::new();
        productos.expect_exists_by_codigo().returning(|_| Ok(true));
        productos.expect_create().never();
        let mut categorias = MockCategoriaRepository::new();
        categorias.expect_exists_by_id().never();

        let service: Service = ProductoService::new(productos, categorias, MockMarcaRepository::new());
        let result = service.create(create_input()).await;

        assert!(matches!(result, Err(InventarioError::DuplicateCode(_))));
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_persists_nothing() {
        let mut productos = MockProductoRepository::new();
        productos.expect_exists_by_codigo().returning(|_| Ok(false));
        productos.expect_create().never();
        let mut categorias = MockCategoriaRepository::new();
        categorias
            .expect_exists_by_id()
            .with(eq(9999))
            .returning(|_| Ok(false));
        let mut marcas = MockMarcaRepository::new();
        marcas.expect_exists_by_id().never();

        let service: Service = ProductoService::new(productos, categorias, marcas);
        let mut input = create_input();
        input.categoria_id = 9999;
        let err = service.create(input).await.unwrap_err();

        assert_eq!(err.to_string(), "No existe categoría con id: 9999");
    }

    #[tokio::test]
    async fn test_create_with_unknown_brand() {
        let mut productos = MockProductoRepository::new();
        productos.expect_exists_by_codigo().returning(|_| Ok(false));
        productos.expect_create().never();
        let mut categorias = MockCategoriaRepository::new();
        categorias.expect_exists_by_id().returning(|_| Ok(true));
        let mut marcas = MockMarcaRepository::new();
        marcas.expect_exists_by_id().returning(|_| Ok(false));

        let service: Service = ProductoService::new(productos, categorias, marcas);
        let err = service.create(create_input()).await.unwrap_err();

        assert!(matches!(
            err,
            InventarioError::NotFound {
                entidad: Entidad::Marca,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_create_embeds_references() {
        let mut productos = MockProductoRepository::new();
        productos.expect_exists_by_codigo().returning(|_| Ok(false));
        productos
            .expect_create()
            .times(1)
            .returning(|input| Ok(Producto::new(10, input)));
        let (mut categorias, mut marcas) = references();
        categorias.expect_exists_by_id().returning(|_| Ok(true));
        marcas.expect_exists_by_id().returning(|_| Ok(true));

        let service: Service = ProductoService::new(productos, categorias, marcas);
        let response = service.create(create_input()).await.unwrap();

        assert_eq!(response.id, 10);
        assert_eq!(response.categoria.unwrap().nombre, "Bebidas");
        assert_eq!(response.marca.unwrap().id, 2);
        assert!(response.activo);
    }

    #[tokio::test]
    async fn test_update_revalidates_unchanged_references() {
        let mut productos = MockProductoRepository::new();
        productos
            .expect_get_by_id()
            .returning(|id| Ok(Some(producto(id, 1))));
        productos.expect_save().never();
        let mut categorias = MockCategoriaRepository::new();
        categorias
            .expect_exists_by_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(false));

        let service: Service = ProductoService::new(productos, categorias, MockMarcaRepository::new());
        let result = service
            .update(
                1,
                UpdateProducto {
                    nombre: Some("Agua con gas".into()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(InventarioError::NotFound {
                entidad: Entidad::Categoria,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_price_range_requires_both_bounds() {
        let mut productos = MockProductoRepository::new();
        productos.expect_list_by_precio().never();
        let service: Service = ProductoService::new(
            productos,
            MockCategoriaRepository::new(),
            MockMarcaRepository::new(),
        );

        for (min, max) in [
            (None, Some(Decimal::TEN)),
            (Some(Decimal::ONE), None),
            (Some(Decimal::TEN), Some(Decimal::ONE)),
        ] {
            let result = service.find_by_precio_range(min, max).await;
            assert!(matches!(result, Err(InventarioError::InvalidRange)));
        }
    }

    #[tokio::test]
    async fn test_price_range_is_inclusive_and_passes_bounds() {
        let mut productos = MockProductoRepository::new();
        productos
            .expect_list_by_precio()
            .with(eq(Decimal::ONE), eq(Decimal::ONE))
            .returning(|_, _| Ok(vec![]));
        let service: Service = ProductoService::new(
            productos,
            MockCategoriaRepository::new(),
            MockMarcaRepository::new(),
        );

        let found = service
            .find_by_precio_range(Some(Decimal::ONE), Some(Decimal::ONE))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_adjust_stock_below_zero() {
        let mut productos = MockProductoRepository::new();
        productos
            .expect_get_by_id()
            .returning(|id| Ok(Some(producto(id, 3))));
        productos.expect_adjust_stock().never();

        let service: Service = ProductoService::new(
            productos,
            MockCategoriaRepository::new(),
            MockMarcaRepository::new(),
        );
        let err = service.adjust_stock(1, -5).await.unwrap_err();

        assert!(matches!(
            err,
            InventarioError::InsufficientStock {
                disponible: 3,
                solicitado: 5
            }
        ));
    }

    #[tokio::test]
    async fn test_adjust_stock_overflow_is_validation_error() {
        let mut productos = MockProductoRepository::new();
        productos
            .expect_get_by_id()
            .returning(|id| Ok(Some(producto(id, i32::MAX - 1))));
        productos.expect_adjust_stock().never();

        let service: Service = ProductoService::new(
            productos,
            MockCategoriaRepository::new(),
            MockMarcaRepository::new(),
        );
        let result = service.adjust_stock(1, 2).await;

        assert!(matches!(result, Err(InventarioError::Validation(_))));
    }

    #[tokio::test]
    async fn test_find_by_marca_unknown_brand() {
        let mut marcas = MockMarcaRepository::new();
        marcas.expect_exists_by_id().returning(|_| Ok(false));
        let mut productos = MockProductoRepository::new();
        productos.expect_list_by_marca().never();

        let service: Service = ProductoService::new(productos, MockCategoriaRepository::new(), marcas);
        let err = service.find_by_marca(42).await.unwrap_err();

        assert_eq!(err.to_string(), "No existe marca con id: 42");
    }

    #[tokio::test]
    async fn test_find_by_codigo_missing() {
        let mut productos = MockProductoRepository::new();
        productos.expect_get_by_codigo().returning(|_| Ok(None));

        let service: Service = ProductoService::new(
            productos,
            MockCategoriaRepository::new(),
            MockMarcaRepository::new(),
        );
        let err = service.find_by_codigo("X-1").await.unwrap_err();

        assert_eq!(err.to_string(), "No existe producto con código: X-1");
    }

    #[tokio::test]
    async fn test_list_batches_reference_lookups() {
        let mut productos = MockProductoRepository::new();
        productos
            .expect_list()
            .with(eq(None))
            .returning(|_| Ok(vec![producto(1, 1), producto(2, 0), producto(3, 7)]));
        let mut categorias = MockCategoriaRepository::new();
        categorias
            .expect_get_by_ids()
            .withf(|ids| ids.to_vec() == vec![1])
            .times(1)
            .returning(|_| Ok(vec![]));
        let mut marcas = MockMarcaRepository::new();
        marcas
            .expect_get_by_ids()
            .withf(|ids| ids.to_vec() == vec![2])
            .times(1)
            .returning(|_| Ok(vec![]));

        let service: Service = ProductoService::new(productos, categorias, marcas);
        let list = service.list().await.unwrap();

        assert_eq!(list.len(), 3);
        assert!(list.iter().all(|p| p.categoria.is_none()));
    }
}
