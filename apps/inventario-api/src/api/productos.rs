use axum::Router;
use domain_inventario::categorias::PgCategoriaRepository;
use domain_inventario::marcas::PgMarcaRepository;
use domain_inventario::productos::{PgProductoRepository, ProductoService, handlers};

/// Products resolve their category and brand through their own repositories.
pub fn router(state: &crate::state::AppState) -> Router {
    let service = ProductoService::new(
        PgProductoRepository::new(state.db.clone()),
        PgCategoriaRepository::new(state.db.clone()),
        PgMarcaRepository::new(state.db.clone()),
    );
    handlers::router(service)
}
