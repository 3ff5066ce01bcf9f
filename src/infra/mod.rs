//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories for the account store and the 3K directory

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{AccountRepository, AccountStore, ThreeKRepository, ThreeKStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockAccountRepository, MockThreeKRepository};
