//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod account_repository;
pub(crate) mod entities;
mod three_k_repository;

pub use account_repository::{AccountRepository, AccountStore};
pub use three_k_repository::{ThreeKRepository, ThreeKStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use three_k_repository::MockThreeKRepository;
