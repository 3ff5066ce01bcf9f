//! Common utilities shared by the referral portal crates.
//!
//! This crate provides:
//! - Unified error handling for HTTP
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
