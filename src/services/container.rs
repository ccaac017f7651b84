//! Service container - centralized service access.
//!
//! Depends on service traits, not implementations, so handlers and tests
//! can swap any service for a mock.

use std::sync::Arc;

use super::{AuthService, CaseService, UserService};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get case service
    fn cases(&self) -> Arc<dyn CaseService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    case_service: Arc<dyn CaseService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        case_service: Arc<dyn CaseService>,
        user_service: Arc<dyn UserService>,
    ) -> Self {
        Self {
            auth_service,
            case_service,
            user_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{Authenticator, CaseManager, UserManager};

        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let case_service = Arc::new(CaseManager::new(uow.clone()));
        let user_service = Arc::new(UserManager::new(uow));

        Self {
            auth_service,
            case_service,
            user_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn cases(&self) -> Arc<dyn CaseService> {
        self.case_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
