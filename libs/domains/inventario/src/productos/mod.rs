//! Products, with references to a category and a brand.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{
    CantidadQuery, CodigoQuery, CreateProducto, Producto, ProductoResponse, ProductoSimple,
    RangoPrecioQuery, UpdateProducto,
};
pub use postgres::PgProductoRepository;
pub use repository::{InMemoryProductoRepository, ProductoRepository};
pub use service::ProductoService;
