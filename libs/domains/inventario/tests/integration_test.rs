//! PostgreSQL repository tests
//!
//! Each test starts its own container through `TestDatabase`, so they are
//! ignored by default. Run with `cargo test -- --ignored`.

use axum_helpers::PageParams;
use domain_inventario::categorias::{CategoriaRepository, CreateCategoria, PgCategoriaRepository};
use domain_inventario::marcas::{CreateMarca, MarcaRepository, PgMarcaRepository};
use domain_inventario::productos::{CreateProducto, PgProductoRepository, ProductoRepository};
use domain_inventario::{Estado, InventarioError};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use test_utils::TestDataBuilder;
use test_utils::TestDatabase;
use test_utils::assertions::{assert_some, assert_sorted_by};

struct Fixture {
    _db: TestDatabase,
    categorias: PgCategoriaRepository,
    marcas: PgMarcaRepository,
    productos: PgProductoRepository,
    builder: TestDataBuilder,
    categoria_id: i32,
    marca_id: i32,
}

impl Fixture {
    async fn new(test_name: &str) -> Self {
        let db = TestDatabase::new().await;
        let conn: DatabaseConnection = db.connection();
        let builder = TestDataBuilder::from_test_name(test_name);

        let categorias = PgCategoriaRepository::new(conn.clone());
        let marcas = PgMarcaRepository::new(conn.clone());
        let productos = PgProductoRepository::new(conn);

        let categoria = categorias
            .create(CreateCategoria {
                nombre: builder.name("categoria", "main"),
                descripcion: None,
            })
            .await
            .unwrap();
        let marca = marcas
            .create(CreateMarca {
                nombre: builder.name("marca", "main"),
                descripcion: None,
                pais_origen: Some("Perú".to_string()),
            })
            .await
            .unwrap();

        Self {
            _db: db,
            categorias,
            marcas,
            productos,
            builder,
            categoria_id: categoria.id,
            marca_id: marca.id,
        }
    }

    fn producto(&self, suffix: &str, precio: Decimal, stock: i32) -> CreateProducto {
        CreateProducto {
            codigo: self.builder.codigo(suffix),
            nombre: self.builder.name("producto", suffix),
            descripcion: None,
            precio,
            stock,
            categoria_id: self.categoria_id,
            marca_id: self.marca_id,
        }
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_categoria_unique_name_maps_to_duplicate() {
    let fx = Fixture::new("test_categoria_unique_name_maps_to_duplicate").await;

    let result = fx
        .categorias
        .create(CreateCategoria {
            nombre: fx.builder.name("categoria", "main"),
            descripcion: Some("otra".to_string()),
        })
        .await;

    assert!(matches!(result, Err(InventarioError::DuplicateName { .. })));
    assert!(fx.categorias.exists_by_nombre(&fx.builder.name("categoria", "main")).await.unwrap());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_categoria_soft_delete_and_filters() {
    let fx = Fixture::new("test_categoria_soft_delete_and_filters").await;
    let otra = fx
        .categorias
        .create(CreateCategoria {
            nombre: fx.builder.name("categoria", "other"),
            descripcion: None,
        })
        .await
        .unwrap();

    let mut inactiva = otra.clone();
    inactiva.estado = Estado::Inactivo;
    let saved = fx.categorias.save(&inactiva).await.unwrap();
    assert_eq!(saved.estado, Estado::Inactivo);
    assert_eq!(saved.fecha_creacion, otra.fecha_creacion);

    let activas = fx.categorias.list(Some(Estado::Activo)).await.unwrap();
    assert_eq!(activas.len(), 1);
    let todas = fx.categorias.list(None).await.unwrap();
    assert_eq!(todas.len(), 2);
    assert_sorted_by(&todas, |c| c.nombre.clone(), "categorias");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_search_is_case_insensitive_and_literal() {
    let fx = Fixture::new("test_search_is_case_insensitive_and_literal").await;

    let found = fx.categorias.search_by_nombre("CATEGORIA").await.unwrap();
    assert_eq!(found.len(), 1);

    // `%` is matched literally
    let none = fx.categorias.search_by_nombre("%").await.unwrap();
    assert!(none.is_empty());

    let por_pais = fx.marcas.search_by_pais("perú").await.unwrap();
    assert_eq!(por_pais.len(), 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_producto_unique_code_maps_to_duplicate() {
    let fx = Fixture::new("test_producto_unique_code_maps_to_duplicate").await;
    fx.productos.create(fx.producto("a", Decimal::new(150, 2), 1)).await.unwrap();

    let mut repetido = fx.producto("b", Decimal::ONE, 1);
    repetido.codigo = fx.builder.codigo("a");
    let result = fx.productos.create(repetido).await;

    assert!(matches!(result, Err(InventarioError::DuplicateCode(_))));
    assert!(fx.productos.exists_by_codigo(&fx.builder.codigo("a")).await.unwrap());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_precio_keeps_two_decimals() {
    let fx = Fixture::new("test_precio_keeps_two_decimals").await;

    let created = fx.productos.create(fx.producto("a", Decimal::new(199, 1), 1)).await.unwrap();
    let fetched = assert_some(
        fx.productos.get_by_codigo(&created.codigo).await.unwrap(),
        "producto por código",
    );

    assert_eq!(fetched.precio.to_string(), "19.90");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_adjust_stock_guard() {
    let fx = Fixture::new("test_adjust_stock_guard").await;
    let producto = fx.productos.create(fx.producto("a", Decimal::ONE, 3)).await.unwrap();

    let result = fx.productos.adjust_stock(producto.id, -5).await;
    assert!(matches!(
        result,
        Err(InventarioError::InsufficientStock { disponible: 3, solicitado: 5 })
    ));

    let unchanged = assert_some(fx.productos.get_by_id(producto.id).await.unwrap(), "producto");
    assert_eq!(unchanged.stock, 3);

    let updated = fx.productos.adjust_stock(producto.id, -3).await.unwrap();
    assert_eq!(updated.stock, 0);

    let missing = fx.productos.adjust_stock(i32::MAX, 1).await;
    assert!(matches!(missing, Err(InventarioError::NotFound { .. })));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_concurrent_decrements_never_oversell() {
    let fx = Fixture::new("test_concurrent_decrements_never_oversell").await;
    let producto = fx.productos.create(fx.producto("a", Decimal::ONE, 5)).await.unwrap();

    let attempts = (0..10).map(|_| {
        let repo = fx.productos.clone();
        tokio::spawn(async move { repo.adjust_stock(producto.id, -1).await })
    });
    let results = futures::future::join_all(attempts).await;
    let ok = results.into_iter().filter(|r| matches!(r, Ok(Ok(_)))).count();

    assert_eq!(ok, 5);
    let after = assert_some(fx.productos.get_by_id(producto.id).await.unwrap(), "producto");
    assert_eq!(after.stock, 0);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_lookups_join_reference_names() {
    let fx = Fixture::new("test_lookups_join_reference_names").await;
    fx.productos.create(fx.producto("a", Decimal::new(500, 2), 0)).await.unwrap();
    fx.productos.create(fx.producto("b", Decimal::new(1500, 2), 2)).await.unwrap();

    let por_categoria = fx
        .productos
        .list_by_categoria_nombre(&fx.builder.name("categoria", "main"))
        .await
        .unwrap();
    assert_eq!(por_categoria.len(), 2);
    assert_sorted_by(&por_categoria, |p| p.nombre.clone(), "por categoría");

    let por_marca = fx
        .productos
        .list_by_marca_nombre(&fx.builder.name("marca", "main"))
        .await
        .unwrap();
    assert_eq!(por_marca.len(), 2);

    let ninguno = fx.productos.list_by_categoria_nombre("no existe").await.unwrap();
    assert!(ninguno.is_empty());

    let rango = fx
        .productos
        .list_by_precio(Decimal::new(500, 2), Decimal::TEN)
        .await
        .unwrap();
    assert_eq!(rango.len(), 1);

    let con_stock = fx.productos.list_con_stock().await.unwrap();
    assert_eq!(con_stock.len(), 1);
    assert_eq!(con_stock[0].codigo, fx.builder.codigo("b"));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_paging_counts_all_rows() {
    let fx = Fixture::new("test_paging_counts_all_rows").await;
    for i in 0..25 {
        fx.productos
            .create(fx.producto(&format!("{i:02}"), Decimal::ONE, 1))
            .await
            .unwrap();
    }

    let first = fx.productos.list_paged(PageParams::new(0, 10)).await.unwrap();
    assert_eq!(first.content.len(), 10);
    assert_eq!(first.total_elements, 25);
    assert_eq!(first.total_pages, 3);
    assert_sorted_by(&first.content, |p| p.nombre.clone(), "primera página");

    let last = fx.productos.list_paged(PageParams::new(2, 10)).await.unwrap();
    assert_eq!(last.content.len(), 5);

    let categorias = fx.categorias.list_paged(PageParams::default()).await.unwrap();
    assert_eq!(categorias.total_elements, 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_adjust_stock_rejects_overflow() {
    let fx = Fixture::new("test_adjust_stock_rejects_overflow").await;
    let producto = fx
        .productos
        .create(fx.producto("a", Decimal::ONE, i32::MAX - 1))
        .await
        .unwrap();

    let result = fx.productos.adjust_stock(producto.id, 5).await;
    assert!(matches!(result, Err(InventarioError::Validation(_))));

    let unchanged = assert_some(fx.productos.get_by_id(producto.id).await.unwrap(), "producto");
    assert_eq!(unchanged.stock, i32::MAX - 1);

    let full = fx.productos.adjust_stock(producto.id, 1).await.unwrap();
    assert_eq!(full.stock, i32::MAX);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_inactive_rows_keep_unique_values() {
    let fx = Fixture::new("test_inactive_rows_keep_unique_values").await;
    let producto = fx.productos.create(fx.producto("a", Decimal::ONE, 1)).await.unwrap();

    let mut inactivo = producto.clone();
    inactivo.estado = Estado::Inactivo;
    fx.productos.save(&inactivo).await.unwrap();

    let result = fx.productos.create(fx.producto("a", Decimal::ONE, 1)).await;
    assert!(matches!(result, Err(InventarioError::DuplicateCode(_))));
}
