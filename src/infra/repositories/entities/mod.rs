//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod three_k_user;
pub mod user;

pub use user::Entity as UserEntity;
