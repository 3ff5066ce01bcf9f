//! Account service - Account API use cases over the `users` table.
//!
//! Every method returns a sanitized projection; the raw [`Account`] with its
//! credential and reset code never leaves this module.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{Account, AccountView, Credential, CredentialScheme, ReferrerAccount, ResetCode};

use crate::config::{ENTITY_REFERRER, ENTITY_USER};
use crate::infra::AccountRepository;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// List every account
    async fn list_accounts(&self) -> AppResult<Vec<AccountView>>;

    /// Find one account by email
    async fn find_by_email(&self, email: &str) -> AppResult<AccountView>;

    /// Find an account by external user id
    async fn find_referrer(&self, user_id: &str) -> AppResult<ReferrerAccount>;

    /// Check a password against the stored credential
    async fn login(&self, email: &str, password: &str) -> AppResult<AccountView>;

    /// Issue and store a reset code
    async fn forgot_password(&self, email: &str) -> AppResult<ResetCode>;

    /// Overwrite the display name, optionally clearing the profile picture
    async fn update_profile(
        &self,
        email: &str,
        name: &str,
        remove_picture: bool,
    ) -> AppResult<AccountView>;

    /// Replace the credential after checking the current one
    async fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()>;
}

/// Concrete implementation of AccountService.
pub struct AccountManager {
    repo: Arc<dyn AccountRepository>,
    scheme: CredentialScheme,
}

impl AccountManager {
    /// `scheme` applies to credentials written by `change_password`.
    pub fn new(repo: Arc<dyn AccountRepository>, scheme: CredentialScheme) -> Self {
        Self { repo, scheme }
    }

    async fn require(&self, email: &str) -> AppResult<Account> {
        self.repo.find_by_email(email).await?.ok_or_not_found(ENTITY_USER)
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn list_accounts(&self) -> AppResult<Vec<AccountView>> {
        let accounts = self.repo.list().await?;
        Ok(accounts.into_iter().map(AccountView::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<AccountView> {
        Ok(self.require(email).await?.view())
    }

    async fn find_referrer(&self, user_id: &str) -> AppResult<ReferrerAccount> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::validation("User ID is required"));
        }

        let account = self
            .repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_not_found(ENTITY_REFERRER)?;

        Ok(ReferrerAccount::from(account))
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<AccountView> {
        let account = self.require(email).await?;

        if !account.credential.matches(password) {
            tracing::debug!("Login rejected for {}", email);
            return Err(AppError::unauthorized("Invalid password"));
        }

        Ok(account.view())
    }

    async fn forgot_password(&self, email: &str) -> AppResult<ResetCode> {
        let reset = ResetCode::issue(Utc::now());

        let affected = self
            .repo
            .set_reset_code(email, reset.code.clone(), reset.expires_at)
            .await?;

        // Zero rows affected is not an error.
        if affected == 0 {
            tracing::debug!("Reset code issued for unknown email {}", email);
        }

        Ok(reset)
    }

    async fn update_profile(
        &self,
        email: &str,
        name: &str,
        remove_picture: bool,
    ) -> AppResult<AccountView> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }

        let account = self
            .repo
            .update_profile(email, name.to_string(), remove_picture)
            .await?
            .ok_or_not_found(ENTITY_USER)?;

        Ok(account.view())
    }

    async fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let account = self.require(email).await?;

        if !account.credential.matches(current_password) {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        let stored = Credential::seal(new_password, self.scheme)?;
        let affected = self.repo.update_credential(email, stored).await?;
        if affected == 0 {
            return Err(AppError::not_found(ENTITY_USER));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockAccountRepository;

    fn account(email: &str, password: Option<&str>) -> Account {
        let now = Utc::now();
        Account {
            id: 1,
            name: "Bob".to_string(),
            email: email.to_string(),
            credential: Credential::from_stored(password.map(str::to_string)),
            user_id: Some("U1".to_string()),
            referrer_id: None,
            token_id: Some("88".to_string()),
            plan_data: None,
            profile_picture: None,
            profile_media_type: None,
            reset_code: None,
            reset_code_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_referrer_rejects_blank_id() {
        let repo = MockAccountRepository::new();
        let service = AccountManager::new(Arc::new(repo), CredentialScheme::Plaintext);

        let err = service.find_referrer("   ").await.unwrap_err();
        assert_eq!(err.to_string(), "User ID is required");
    }

    #[tokio::test]
    async fn test_change_password_seals_with_configured_scheme() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "a@example.com")
            .returning(|email| Ok(Some(account(email, Some("old")))));
        repo.expect_update_credential()
            .withf(|email, stored| email == "a@example.com" && stored.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(1));

        let service = AccountManager::new(Arc::new(repo), CredentialScheme::Argon2);
        service
            .change_password("a@example.com", "old", "new-secret")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_profile_requires_name() {
        let mut repo = MockAccountRepository::new();
        repo.expect_update_profile().never();

        let service = AccountManager::new(Arc::new(repo), CredentialScheme::Plaintext);
        let err = service
            .update_profile("a@example.com", "  ", false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
