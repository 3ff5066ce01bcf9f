//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! accounts and their sanitized views, credentials, reset codes, the 3K
//! directory record and the referrer resolution state machine.

pub mod account;
pub mod constants;
pub mod credential;
pub mod error;
pub mod referrer;
pub mod reset_code;
pub mod three_k;

pub use account::{Account, AccountView, ReferrerAccount};
pub use constants::*;
pub use credential::{Credential, CredentialScheme};
pub use error::{DomainError, DomainResult};
pub use referrer::{
    FlowState, MintingHandoff, NameNotice, NameSource, PrimaryFailure, ReferrerDisplay,
    ReferrerFlow, ThreeKOutcome,
};
pub use reset_code::ResetCode;
pub use three_k::ThreeKUser;
