use std::sync::Arc;

use petchip_core::microchip::ManufacturerDirectory;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: petchip_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Manufacturer registry used to resolve chip numbers. Injected so
    /// tests can substitute fixtures for the production directory.
    pub directory: Arc<dyn ManufacturerDirectory>,
}
