//! # Axum Helpers
//!
//! Shared building blocks for the inventory HTTP API.
//!
//! - **[`errors`]**: [`AppError`], [`ErrorCode`] and the JSON [`ErrorResponse`] body
//! - **[`extractors`]**: [`IdPath`], [`ValidatedJson`], [`ValidatedQuery`]
//! - **[`pagination`]**: [`PageParams`] and [`PageResponse`]
//! - **[`http`]**: CORS and security headers
//! - **[`server`]**: router assembly with OpenAPI UIs, health checks, graceful shutdown
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes).await?;
//! create_production_app(router.merge(health_router(app_info!())), &config.server, cleanup).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod pagination;
pub mod server;

pub use server::{
    CleanupCoordinator, HealthCheckFuture, HealthResponse, ShutdownCoordinator, build_router,
    close_postgres, create_app, create_production_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, ValidatedJson, ValidatedQuery};

pub use pagination::{PageParams, PageResponse};
