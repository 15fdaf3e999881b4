//! Inventory Domain
//!
//! Categories, brands and products with soft delete, pagination and
//! filtered lookups.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints + OpenAPI docs
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Uniqueness, references, stock rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Domain structs, DTOs, SeaORM entities
//! └─────────────┘
//! ```
//!
//! Each of [`categorias`], [`marcas`] and [`productos`] follows this layout.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventario::{
//!     categorias::{self, CategoriaService, InMemoryCategoriaRepository},
//!     marcas::InMemoryMarcaRepository,
//!     productos::{self, InMemoryProductoRepository, ProductoService},
//! };
//!
//! let categorias_repo = InMemoryCategoriaRepository::new();
//! let marcas_repo = InMemoryMarcaRepository::new();
//!
//! let categorias_router = categorias::handlers::router(CategoriaService::new(categorias_repo.clone()));
//! // Clones share storage, so product name lookups see the same categories and brands.
//! let productos_repo = InMemoryProductoRepository::new(categorias_repo.clone(), marcas_repo.clone());
//! let productos_router = productos::handlers::router(ProductoService::new(
//!     productos_repo,
//!     categorias_repo,
//!     marcas_repo,
//! ));
//! ```

pub mod categorias;
pub mod error;
pub mod estado;
pub mod marcas;
pub mod params;
pub mod productos;
mod search;
mod validation;

pub use error::{Entidad, InventarioError, InventarioResult};
pub use estado::Estado;
