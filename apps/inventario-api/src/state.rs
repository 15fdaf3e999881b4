//! State shared by the readiness handler and the router builders.

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Pooled connection; clones share the pool
    pub db: DatabaseConnection,
}
