use axum::Router;
use domain_inventario::categorias::{CategoriaService, PgCategoriaRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgCategoriaRepository::new(state.db.clone());
    handlers::router(CategoriaService::new(repository))
}
