//! Service Container - Centralized service access.
//!
//! Wires repositories into services once at startup and hands out shared
//! trait objects to the HTTP layer.

use std::sync::Arc;

use super::{
    AccountManager, AccountService, ReferrerResolver, SystemManager, SystemService,
    ThreeKDirectory, ThreeKService,
};
use crate::config::Config;
use crate::infra::{AccountStore, Database, ThreeKStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Account API service
    fn accounts(&self) -> Arc<dyn AccountService>;

    /// 3K directory service
    fn three_k(&self) -> Arc<dyn ThreeKService>;

    /// Health and bootstrap service
    fn system(&self) -> Arc<dyn SystemService>;

    /// Referrer page resolver
    fn referrer(&self) -> Arc<ReferrerResolver>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    account_service: Arc<dyn AccountService>,
    three_k_service: Arc<dyn ThreeKService>,
    system_service: Arc<dyn SystemService>,
    referrer_resolver: Arc<ReferrerResolver>,
}

impl Services {
    /// Create a service container with manually injected services
    pub fn new(
        account_service: Arc<dyn AccountService>,
        three_k_service: Arc<dyn ThreeKService>,
        system_service: Arc<dyn SystemService>,
        lookup_timeout: std::time::Duration,
    ) -> Self {
        let referrer_resolver = Arc::new(ReferrerResolver::new(
            account_service.clone(),
            three_k_service.clone(),
            lookup_timeout,
        ));

        Self {
            account_service,
            three_k_service,
            system_service,
            referrer_resolver,
        }
    }

    /// Create service container from the store connections and config
    pub fn from_databases(
        database: Arc<Database>,
        three_k: Option<Arc<Database>>,
        config: &Config,
    ) -> Self {
        let accounts = Arc::new(AccountStore::new(database.get_connection()));
        let directory = Arc::new(ThreeKStore::new(
            three_k.as_ref().map(|db| db.get_connection()),
        ));

        Self::new(
            Arc::new(AccountManager::new(accounts, config.password_storage)),
            Arc::new(ThreeKDirectory::new(directory)),
            Arc::new(SystemManager::new(database, three_k)),
            config.lookup_timeout(),
        )
    }
}

impl ServiceContainer for Services {
    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn three_k(&self) -> Arc<dyn ThreeKService> {
        self.three_k_service.clone()
    }

    fn system(&self) -> Arc<dyn SystemService> {
        self.system_service.clone()
    }

    fn referrer(&self) -> Arc<ReferrerResolver> {
        self.referrer_resolver.clone()
    }
}
