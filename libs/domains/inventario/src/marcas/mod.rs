//! Brands.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{CreateMarca, Marca, MarcaResponse, MarcaSimple, PaisQuery, UpdateMarca};
pub use postgres::PgMarcaRepository;
pub use repository::{InMemoryMarcaRepository, MarcaRepository};
pub use service::MarcaService;
