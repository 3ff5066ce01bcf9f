//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services.

use std::sync::Arc;

use crate::services::{
    AccountService, ReferrerResolver, ServiceContainer, SystemService, ThreeKService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Account API service
    pub account_service: Arc<dyn AccountService>,
    /// 3K directory service
    pub three_k_service: Arc<dyn ThreeKService>,
    /// Health and bootstrap service
    pub system_service: Arc<dyn SystemService>,
    /// Referrer page resolver
    pub referrer_resolver: Arc<ReferrerResolver>,
}

impl AppState {
    /// Create application state from a service container.
    pub fn from_container(container: &dyn ServiceContainer) -> Self {
        Self {
            account_service: container.accounts(),
            three_k_service: container.three_k(),
            system_service: container.system(),
            referrer_resolver: container.referrer(),
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        account_service: Arc<dyn AccountService>,
        three_k_service: Arc<dyn ThreeKService>,
        system_service: Arc<dyn SystemService>,
        referrer_resolver: Arc<ReferrerResolver>,
    ) -> Self {
        Self {
            account_service,
            three_k_service,
            system_service,
            referrer_resolver,
        }
    }
}
