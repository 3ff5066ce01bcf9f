//! Account domain entity and its sanitized projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credential::Credential;

/// Account as stored in the `users` table.
///
/// Holds the credential and reset-code fields, so it is never serialized.
/// Every outward path goes through [`AccountView`] or [`ReferrerAccount`].
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub credential: Credential,
    pub user_id: Option<String>,
    pub referrer_id: Option<String>,
    pub token_id: Option<String>,
    pub plan_data: Option<serde_json::Value>,
    pub profile_picture: Option<String>,
    pub profile_media_type: Option<String>,
    pub reset_code: Option<String>,
    pub reset_code_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Sanitized view of this account.
    pub fn view(&self) -> AccountView {
        AccountView::from(self)
    }
}

/// Account fields that are safe to return to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountView {
    /// Store-assigned identifier
    pub id: i32,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// External user identifier
    pub user_id: Option<String>,
    /// Identifier of the account that referred this one
    pub referrer_id: Option<String>,
    /// Token identifier
    pub token_id: Option<String>,
    /// Opaque plan attributes
    #[serde(rename = "plan_a")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub plan_data: Option<serde_json::Value>,
    /// Profile picture reference
    pub profile_picture: Option<String>,
    /// Content type of the profile picture
    pub profile_media_type: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            user_id: account.user_id.clone(),
            referrer_id: account.referrer_id.clone(),
            token_id: account.token_id.clone(),
            plan_data: account.plan_data.clone(),
            profile_picture: account.profile_picture.clone(),
            profile_media_type: account.profile_media_type.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            user_id: account.user_id,
            referrer_id: account.referrer_id,
            token_id: account.token_id,
            plan_data: account.plan_data,
            profile_picture: account.profile_picture,
            profile_media_type: account.profile_media_type,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Account summary returned by the external-id lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReferrerAccount {
    /// External user identifier the lookup matched
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Token identifier
    pub token_id: Option<String>,
}

impl From<Account> for ReferrerAccount {
    fn from(account: Account) -> Self {
        Self {
            user_id: account.user_id.unwrap_or_default(),
            name: account.name,
            email: account.email,
            token_id: account.token_id,
        }
    }
}
