use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, PageParams, PageResponse, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, InvalidIdResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::models::{CategoriaResponse, CategoriaSimple, CreateCategoria, UpdateCategoria};
use super::repository::CategoriaRepository;
use super::service::CategoriaService;
use crate::error::InventarioResult;
use crate::params::NombreQuery;

pub const TAG: &str = "categorias";

/// OpenAPI documentation for the categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categorias,
        create_categoria,
        get_categoria,
        update_categoria,
        delete_categoria,
        list_categorias_paginadas,
        list_categorias_simple,
        buscar_categorias,
        existe_categoria,
    ),
    components(
        schemas(CategoriaResponse, CategoriaSimple, CreateCategoria, UpdateCategoria),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InvalidIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Categorías de productos")
    )
)]
pub struct ApiDoc;

pub fn router<R: CategoriaRepository + 'static>(service: CategoriaService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categorias).post(create_categoria))
        .route("/paginadas", get(list_categorias_paginadas))
        .route("/simple", get(list_categorias_simple))
        .route("/buscar", get(buscar_categorias))
        .route("/existe", get(existe_categoria))
        .route(
            "/{id}",
            get(get_categoria)
                .put(update_categoria)
                .delete(delete_categoria),
        )
        .with_state(shared_service)
}

/// List every category, active or not
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Categorías ordenadas por nombre", body = Vec<CategoriaResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categorias<R: CategoriaRepository>(
    State(service): State<Arc<CategoriaService<R>>>,
) -> InventarioResult<Json<Vec<CategoriaResponse>>> {
    let categorias = service.list().await?;
    Ok(Json(categorias.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCategoria,
    responses(
        (status = 201, description = "Categoría creada", body = CategoriaResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_categoria<R: CategoriaRepository>(
    State(service): State<Arc<CategoriaService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategoria>,
) -> InventarioResult<impl IntoResponse> {
    let categoria = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(CategoriaResponse::from(categoria))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Categoría encontrada", body = CategoriaResponse),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_categoria<R: CategoriaRepository>(
    State(service): State<Arc<CategoriaService<R>>>,
    IdPath(id): IdPath,
) -> InventarioResult<Json<CategoriaResponse>> {
    let categoria = service.get_by_id(id).await?;
    Ok(Json(categoria.into()))
}

/// Partial update: absent fields keep their stored value
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategoria,
    responses(
        (status = 200, description = "Categoría actualizada", body = CategoriaResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_categoria<R: CategoriaRepository>(
    State(service): State<Arc<CategoriaService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCategoria>,
) -> InventarioResult<Json<CategoriaResponse>> {
    let categoria = service.update(id, input).await?;
    Ok(Json(categoria.into()))
}

/// Soft delete
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Categoría desactivada"),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_categoria<R: CategoriaRepository>(
    State(service): State<Arc<CategoriaService<R>>>,
    IdPath(id): IdPath,
) -> InventarioResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/paginadas",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Página de categorías", body = PageResponse<CategoriaResponse>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_categorias_paginadas<R: CategoriaRepository>(
    State(service): State<Arc<CategoriaService<R>>>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> InventarioResult<Json<PageResponse<CategoriaResponse>>> {
    let page = service.list_paged(params).await?;
    Ok(Json(page.map(Into::into)))
}

/// Active categories as `{id, nombre}`
#[utoipa::path(
    get,
    path = "/simple",
    tag = TAG,
    responses(
        (status = 200, description = "Categorías activas", body = Vec<CategoriaSimple>)
    )
)]
async fn list_categorias_simple<R: CategoriaRepository>(
    State(service): State<Arc<CategoriaService<R>>>,
) -> InventarioResult<Json<Vec<CategoriaSimple>>> {
    Ok(Json(service.list_active_simple().await?))
}

/// Case-insensitive search by name fragment
#[utoipa::path(
    get,
    path = "/buscar",
    tag = TAG,
    params(NombreQuery),
    responses(
        (status = 200, description = "Categorías coincidentes", body = Vec<CategoriaResponse>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn buscar_categorias<R: CategoriaRepository>(
    State(service): State<Arc<CategoriaService<R>>>,
    ValidatedQuery(query): ValidatedQuery<NombreQuery>,
) -> InventarioResult<Json<Vec<CategoriaResponse>>> {
    let categorias = service.search_by_nombre(&query.nombre).await?;
    Ok(Json(categorias.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/existe",
    tag = TAG,
    params(NombreQuery),
    responses(
        (status = 200, description = "Whether a category with this exact name exists", body = bool)
    )
)]
async fn existe_categoria<R: CategoriaRepository>(
    State(service): State<Arc<CategoriaService<R>>>,
    ValidatedQuery(query): ValidatedQuery<NombreQuery>,
) -> InventarioResult<Json<bool>> {
    Ok(Json(service.exists_by_nombre(&query.nombre).await?))
}
