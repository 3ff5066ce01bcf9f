//! Referral Portal - account API and referrer resolution service
//!
//! Serves the account API over the Postgres `users` table, a read-only
//! lookup into the MySQL 3K directory, and the referrer landing page that
//! merges both.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (databases, repositories, migrations)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared response types
//!
//! Domain entities live in the `domain` crate, error handling in `common`.
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server, applying migrations first
//! cargo run -- serve --migrate
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use common::{AppError, AppResult};
pub use config::Config;
