use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    IdPath, PageParams, PageResponse, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        InvalidIdResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::models::{
    CantidadQuery, CodigoQuery, CreateProducto, ProductoResponse, ProductoSimple,
    RangoPrecioQuery, UpdateProducto,
};
use super::repository::ProductoRepository;
use super::service::ProductoService;
use crate::categorias::CategoriaRepository;
use crate::error::InventarioResult;
use crate::marcas::MarcaRepository;
use crate::params::NombreQuery;

pub const TAG: &str = "productos";

/// OpenAPI documentation for the products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_productos,
        create_producto,
        get_producto,
        update_producto,
        delete_producto,
        list_productos_paginados,
        list_productos_simple,
        get_producto_por_codigo,
        buscar_productos_por_nombre,
        list_por_categoria,
        list_por_marca,
        list_por_categoria_nombre,
        list_por_marca_nombre,
        list_por_rango_precio,
        list_con_stock,
        existe_codigo,
        actualizar_stock,
    ),
    components(
        schemas(ProductoResponse, ProductoSimple, CreateProducto, UpdateProducto),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            InvalidIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Productos del inventario")
    )
)]
pub struct ApiDoc;

type Shared<P, C, M> = State<Arc<ProductoService<P, C, M>>>;

pub fn router<P, C, M>(service: ProductoService<P, C, M>) -> Router
where
    P: ProductoRepository + 'static,
    C: CategoriaRepository + 'static,
    M: MarcaRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_productos).post(create_producto))
        .route("/paginados", get(list_productos_paginados))
        .route("/simple", get(list_productos_simple))
        .route("/codigo/{codigo}", get(get_producto_por_codigo))
        .route("/buscar-por-nombre", get(buscar_productos_por_nombre))
        .route("/por-categoria/{categoria_id}", get(list_por_categoria))
        .route("/por-marca/{marca_id}", get(list_por_marca))
        .route("/por-categoria-nombre", get(list_por_categoria_nombre))
        .route("/por-marca-nombre", get(list_por_marca_nombre))
        .route("/por-rango-precio", get(list_por_rango_precio))
        .route("/con-stock", get(list_con_stock))
        .route("/existe-codigo", get(existe_codigo))
        .route(
            "/{id}",
            get(get_producto)
                .put(update_producto)
                .delete(delete_producto),
        )
        .route("/{id}/actualizar-stock", patch(actualizar_stock))
        .with_state(shared_service)
}

#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Productos ordenados por nombre", body = Vec<ProductoResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_productos<P, C, M>(
    State(service): Shared<P, C, M>,
) -> InventarioResult<Json<Vec<ProductoResponse>>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.list().await?))
}

/// Create a product; category and brand must exist
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProducto,
    responses(
        (status = 201, description = "Producto creado", body = ProductoResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_producto<P, C, M>(
    State(service): Shared<P, C, M>,
    ValidatedJson(input): ValidatedJson<CreateProducto>,
) -> InventarioResult<impl IntoResponse>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    let producto = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(producto)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Producto encontrado", body = ProductoResponse),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_producto<P, C, M>(
    State(service): Shared<P, C, M>,
    IdPath(id): IdPath,
) -> InventarioResult<Json<ProductoResponse>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.get_by_id(id).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProducto,
    responses(
        (status = 200, description = "Producto actualizado", body = ProductoResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_producto<P, C, M>(
    State(service): Shared<P, C, M>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProducto>,
) -> InventarioResult<Json<ProductoResponse>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.update(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Producto desactivado"),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_producto<P, C, M>(
    State(service): Shared<P, C, M>,
    IdPath(id): IdPath,
) -> InventarioResult<StatusCode>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/paginados",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Página de productos", body = PageResponse<ProductoResponse>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_productos_paginados<P, C, M>(
    State(service): Shared<P, C, M>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> InventarioResult<Json<PageResponse<ProductoResponse>>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.list_paged(params).await?))
}

#[utoipa::path(
    get,
    path = "/simple",
    tag = TAG,
    responses(
        (status = 200, description = "Productos activos", body = Vec<ProductoSimple>)
    )
)]
async fn list_productos_simple<P, C, M>(
    State(service): Shared<P, C, M>,
) -> InventarioResult<Json<Vec<ProductoSimple>>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.list_active_simple().await?))
}

#[utoipa::path(
    get,
    path = "/codigo/{codigo}",
    tag = TAG,
    params(("codigo" = String, Path, description = "Exact product code")),
    responses(
        (status = 200, description = "Producto encontrado", body = ProductoResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_producto_por_codigo<P, C, M>(
    State(service): Shared<P, C, M>,
    Path(codigo): Path<String>,
) -> InventarioResult<Json<ProductoResponse>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.find_by_codigo(&codigo).await?))
}

#[utoipa::path(
    get,
    path = "/buscar-por-nombre",
    tag = TAG,
    params(NombreQuery),
    responses(
        (status = 200, description = "Productos coincidentes", body = Vec<ProductoResponse>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn buscar_productos_por_nombre<P, C, M>(
    State(service): Shared<P, C, M>,
    ValidatedQuery(query): ValidatedQuery<NombreQuery>,
) -> InventarioResult<Json<Vec<ProductoResponse>>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.search_by_nombre(&query.nombre).await?))
}

#[utoipa::path(
    get,
    path = "/por-categoria/{categoria_id}",
    tag = TAG,
    params(("categoria_id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Productos de la categoría", body = Vec<ProductoResponse>),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn list_por_categoria<P, C, M>(
    State(service): Shared<P, C, M>,
    IdPath(categoria_id): IdPath,
) -> InventarioResult<Json<Vec<ProductoResponse>>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.find_by_categoria(categoria_id).await?))
}

#[utoipa::path(
    get,
    path = "/por-marca/{marca_id}",
    tag = TAG,
    params(("marca_id" = i32, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Productos de la marca", body = Vec<ProductoResponse>),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn list_por_marca<P, C, M>(
    State(service): Shared<P, C, M>,
    IdPath(marca_id): IdPath,
) -> InventarioResult<Json<Vec<ProductoResponse>>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.find_by_marca(marca_id).await?))
}

/// Products whose category has exactly this name
#[utoipa::path(
    get,
    path = "/por-categoria-nombre",
    tag = TAG,
    params(NombreQuery),
    responses(
        (status = 200, description = "Productos de la categoría", body = Vec<ProductoResponse>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_por_categoria_nombre<P, C, M>(
    State(service): Shared<P, C, M>,
    ValidatedQuery(query): ValidatedQuery<NombreQuery>,
) -> InventarioResult<Json<Vec<ProductoResponse>>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.find_by_categoria_nombre(&query.nombre).await?))
}

/// Products whose brand has exactly this name
#[utoipa::path(
    get,
    path = "/por-marca-nombre",
    tag = TAG,
    params(NombreQuery),
    responses(
        (status = 200, description = "Productos de la marca", body = Vec<ProductoResponse>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_por_marca_nombre<P, C, M>(
    State(service): Shared<P, C, M>,
    ValidatedQuery(query): ValidatedQuery<NombreQuery>,
) -> InventarioResult<Json<Vec<ProductoResponse>>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.find_by_marca_nombre(&query.nombre).await?))
}

#[utoipa::path(
    get,
    path = "/por-rango-precio",
    tag = TAG,
    params(RangoPrecioQuery),
    responses(
        (status = 200, description = "Productos con precio en el rango", body = Vec<ProductoResponse>),
        (status = 400, response = BadRequestResponse)
    )
)]
async fn list_por_rango_precio<P, C, M>(
    State(service): Shared<P, C, M>,
    ValidatedQuery(query): ValidatedQuery<RangoPrecioQuery>,
) -> InventarioResult<Json<Vec<ProductoResponse>>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(
        service
            .find_by_precio_range(query.precio_min, query.precio_max)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/con-stock",
    tag = TAG,
    responses(
        (status = 200, description = "Productos con stock mayor que cero", body = Vec<ProductoResponse>)
    )
)]
async fn list_con_stock<P, C, M>(
    State(service): Shared<P, C, M>,
) -> InventarioResult<Json<Vec<ProductoResponse>>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.find_with_stock().await?))
}

#[utoipa::path(
    get,
    path = "/existe-codigo",
    tag = TAG,
    params(CodigoQuery),
    responses(
        (status = 200, description = "Whether a product with this exact code exists", body = bool)
    )
)]
async fn existe_codigo<P, C, M>(
    State(service): Shared<P, C, M>,
    ValidatedQuery(query): ValidatedQuery<CodigoQuery>,
) -> InventarioResult<Json<bool>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.exists_by_codigo(&query.codigo).await?))
}

/// Add (positive) or remove (negative) units
#[utoipa::path(
    patch,
    path = "/{id}/actualizar-stock",
    tag = TAG,
    params(("id" = i32, Path, description = "Product id"), CantidadQuery),
    responses(
        (status = 200, description = "Stock actualizado", body = ProductoResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn actualizar_stock<P, C, M>(
    State(service): Shared<P, C, M>,
    IdPath(id): IdPath,
    ValidatedQuery(query): ValidatedQuery<CantidadQuery>,
) -> InventarioResult<Json<ProductoResponse>>
where
    P: ProductoRepository,
    C: CategoriaRepository,
    M: MarcaRepository,
{
    Ok(Json(service.adjust_stock(id, query.cantidad).await?))
}
