use axum::Router;
use axum::routing::get;

pub mod categorias;
pub mod health;
pub mod marcas;
pub mod productos;

/// API routes without the `/api` prefix, which `create_router` adds.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/categorias", categorias::router(state))
        .nest("/marcas", marcas::router(state))
        .nest("/productos", productos::router(state))
}

/// `/ready`, checked against the live database.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
