//! Application state for dependency injection.

use std::sync::Arc;

use common::StorageBackend;
use user_service_lib::infra::Database;
use user_service_lib::service::UserService;
use user_service_lib::Storage;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub backend: StorageBackend,
    /// Present only when the relational backend is in use
    pub database: Option<Database>,
    pub service_name: String,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        backend: StorageBackend,
        database: Option<Database>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            user_service,
            backend,
            database,
            service_name: service_name.into(),
        }
    }

    /// Wire the user service to the selected store.
    pub fn from_storage(storage: Storage, service_name: impl Into<String>) -> Self {
        let user_service = Arc::new(storage.user_service());
        Self::new(
            user_service,
            storage.backend,
            storage.database,
            service_name,
        )
    }
}
