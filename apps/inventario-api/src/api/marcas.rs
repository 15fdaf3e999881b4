use axum::Router;
use domain_inventario::marcas::{MarcaService, PgMarcaRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgMarcaRepository::new(state.db.clone());
    handlers::router(MarcaService::new(repository))
}
