//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::path::PathBuf;
use std::sync::Arc;

use crate::infra::{BlobStorage, Database, FileStore};
use crate::services::{AuthService, CaseService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization with full
/// ServiceContainer and UnitOfWork support.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Case service
    pub case_service: Arc<dyn CaseService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Document blob storage
    pub storage: Arc<dyn BlobStorage>,
    /// Directory served under /uploads
    pub upload_dir: PathBuf,
    /// Database connection
    pub database: Arc<Database>,
    /// Internal service container (optional, only with from_config)
    service_container: Option<Arc<Services>>,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service management.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let upload_dir = PathBuf::from(config.upload_dir.clone());
        let storage = Arc::new(FileStore::new(upload_dir.clone()));
        let container = Arc::new(Services::from_connection(database.get_connection(), config));

        Self {
            auth_service: container.auth(),
            case_service: container.cases(),
            user_service: container.users(),
            storage,
            upload_dir,
            database,
            service_container: Some(container),
        }
    }

    /// Create new application state with manually injected services.
    ///
    /// Note: This method does not provide ServiceContainer access.
    /// Use `from_config()` for full functionality.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        case_service: Arc<dyn CaseService>,
        user_service: Arc<dyn UserService>,
        storage: Arc<dyn BlobStorage>,
        upload_dir: PathBuf,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            case_service,
            user_service,
            storage,
            upload_dir,
            database,
            service_container: None,
        }
    }

    /// Get the service container for centralized service access.
    ///
    /// Returns `Some` only if created via `from_config()`.
    pub fn services(&self) -> Option<&Arc<Services>> {
        self.service_container.as_ref()
    }
}
