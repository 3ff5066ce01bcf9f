//! 3K directory record.

use serde::{Deserialize, Serialize};

/// A row of the 3K users directory, keyed by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ThreeKUser {
    /// External user identifier
    pub user_id: String,
    /// Display name override
    pub name: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Token identifier
    pub token_id: Option<String>,
}

impl ThreeKUser {
    /// The display name, if the record carries a non-empty one.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
