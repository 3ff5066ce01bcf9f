//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod account_service;
pub mod container;
mod referrer_resolver;
mod system_service;
mod three_k_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use account_service::{AccountManager, AccountService};
pub use referrer_resolver::ReferrerResolver;
pub use system_service::{HealthReport, SystemManager, SystemService, ThreeKStatus};
pub use three_k_service::{ThreeKDirectory, ThreeKService};
