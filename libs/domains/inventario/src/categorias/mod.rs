//! Product categories.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{Categoria, CategoriaResponse, CategoriaSimple, CreateCategoria, UpdateCategoria};
pub use postgres::PgCategoriaRepository;
pub use repository::{CategoriaRepository, InMemoryCategoriaRepository};
pub use service::CategoriaService;
