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

use super::models::{CreateMarca, MarcaResponse, MarcaSimple, PaisQuery, UpdateMarca};
use super::repository::MarcaRepository;
use super::service::MarcaService;
use crate::error::InventarioResult;
use crate::params::NombreQuery;

pub const TAG: &str = "marcas";

/// OpenAPI documentation for the brands API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_marcas,
        create_marca,
        get_marca,
        update_marca,
        delete_marca,
        list_marcas_paginadas,
        list_marcas_simple,
        buscar_marcas_por_nombre,
        buscar_marcas_por_pais,
        existe_marca,
    ),
    components(
        schemas(MarcaResponse, MarcaSimple, CreateMarca, UpdateMarca),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            InvalidIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Marcas de productos")
    )
)]
pub struct ApiDoc;

pub fn router<R: MarcaRepository + 'static>(service: MarcaService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_marcas).post(create_marca))
        .route("/paginadas", get(list_marcas_paginadas))
        .route("/simple", get(list_marcas_simple))
        .route("/buscar-por-nombre", get(buscar_marcas_por_nombre))
        .route("/buscar-por-pais", get(buscar_marcas_por_pais))
        .route("/existe", get(existe_marca))
        .route(
            "/{id}",
            get(get_marca).put(update_marca).delete(delete_marca),
        )
        .with_state(shared_service)
}

fn to_responses(marcas: Vec<super::Marca>) -> Vec<MarcaResponse> {
    marcas.into_iter().map(MarcaResponse::from).collect()
}

#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Marcas ordenadas por nombre", body = Vec<MarcaResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_marcas<R: MarcaRepository>(
    State(service): State<Arc<MarcaService<R>>>,
) -> InventarioResult<Json<Vec<MarcaResponse>>> {
    Ok(Json(to_responses(service.list().await?)))
}

#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateMarca,
    responses(
        (status = 201, description = "Marca creada", body = MarcaResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_marca<R: MarcaRepository>(
    State(service): State<Arc<MarcaService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateMarca>,
) -> InventarioResult<impl IntoResponse> {
    let marca = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(MarcaResponse::from(marca))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Marca encontrada", body = MarcaResponse),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_marca<R: MarcaRepository>(
    State(service): State<Arc<MarcaService<R>>>,
    IdPath(id): IdPath,
) -> InventarioResult<Json<MarcaResponse>> {
    Ok(Json(service.get_by_id(id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Brand id")),
    request_body = UpdateMarca,
    responses(
        (status = 200, description = "Marca actualizada", body = MarcaResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn update_marca<R: MarcaRepository>(
    State(service): State<Arc<MarcaService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateMarca>,
) -> InventarioResult<Json<MarcaResponse>> {
    Ok(Json(service.update(id, input).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 204, description = "Marca desactivada"),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_marca<R: MarcaRepository>(
    State(service): State<Arc<MarcaService<R>>>,
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
        (status = 200, description = "Página de marcas", body = PageResponse<MarcaResponse>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_marcas_paginadas<R: MarcaRepository>(
    State(service): State<Arc<MarcaService<R>>>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> InventarioResult<Json<PageResponse<MarcaResponse>>> {
    Ok(Json(service.list_paged(params).await?.map(Into::into)))
}

#[utoipa::path(
    get,
    path = "/simple",
    tag = TAG,
    responses(
        (status = 200, description = "Marcas activas", body = Vec<MarcaSimple>)
    )
)]
async fn list_marcas_simple<R: MarcaRepository>(
    State(service): State<Arc<MarcaService<R>>>,
) -> InventarioResult<Json<Vec<MarcaSimple>>> {
    Ok(Json(service.list_active_simple().await?))
}

#[utoipa::path(
    get,
    path = "/buscar-por-nombre",
    tag = TAG,
    params(NombreQuery),
    responses(
        (status = 200, description = "Marcas coincidentes", body = Vec<MarcaResponse>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn buscar_marcas_por_nombre<R: MarcaRepository>(
    State(service): State<Arc<MarcaService<R>>>,
    ValidatedQuery(query): ValidatedQuery<NombreQuery>,
) -> InventarioResult<Json<Vec<MarcaResponse>>> {
    Ok(Json(to_responses(service.search_by_nombre(&query.nombre).await?)))
}

#[utoipa::path(
    get,
    path = "/buscar-por-pais",
    tag = TAG,
    params(PaisQuery),
    responses(
        (status = 200, description = "Marcas del país indicado", body = Vec<MarcaResponse>),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn buscar_marcas_por_pais<R: MarcaRepository>(
    State(service): State<Arc<MarcaService<R>>>,
    ValidatedQuery(query): ValidatedQuery<PaisQuery>,
) -> InventarioResult<Json<Vec<MarcaResponse>>> {
    Ok(Json(to_responses(service.search_by_pais(&query.pais_origen).await?)))
}

#[utoipa::path(
    get,
    path = "/existe",
    tag = TAG,
    params(NombreQuery),
    responses(
        (status = 200, description = "Whether a brand with this exact name exists", body = bool)
    )
)]
async fn existe_marca<R: MarcaRepository>(
    State(service): State<Arc<MarcaService<R>>>,
    ValidatedQuery(query): ValidatedQuery<NombreQuery>,
) -> InventarioResult<Json<bool>> {
    Ok(Json(service.exists_by_nombre(&query.nombre).await?))
}
