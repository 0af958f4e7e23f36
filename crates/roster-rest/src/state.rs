//! Application state for Axum handlers.

use roster_repository::DatabasePoolInterface;
use roster_service::UserService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub database: Arc<dyn DatabasePoolInterface>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>, database: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
