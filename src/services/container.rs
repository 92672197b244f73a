//! Service container - Centralized service construction and access.

use std::sync::Arc;

use super::{AuthService, Authenticator, TokenService, UserManager, UserService};
use crate::config::Config;
use crate::infra::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(auth_service: Arc<dyn AuthService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }

    /// Create service container from database connection and config.
    ///
    /// The token service (signing secret + revocation set) is built here
    /// once and shared; there are no module-level singletons.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db));
        let tokens = Arc::new(TokenService::new(config));

        let auth_service = Arc::new(Authenticator::new(users.clone(), tokens));
        let user_service = Arc::new(UserManager::new(users));

        Self {
            auth_service,
            user_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
