//! Read-only access to the 3K users directory (MySQL).

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use super::entities::three_k_user::Entity as ThreeKUserEntity;
use common::{AppError, AppResult};
use domain::ThreeKUser;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ThreeKRepository: Send + Sync {
    /// Find a directory record by external user id.
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<ThreeKUser>>;
}

/// 3K store; holds no connection when the directory is not configured.
pub struct ThreeKStore {
    db: Option<DatabaseConnection>,
}

impl ThreeKStore {
    pub fn new(db: Option<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub fn is_configured(&self) -> bool {
        self.db.is_some()
    }
}

#[async_trait]
impl ThreeKRepository for ThreeKStore {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<ThreeKUser>> {
        let db = self
            .db
            .as_ref()
            .ok_or_else(|| AppError::backend_unavailable("3K database is not configured"))?;

        let result = ThreeKUserEntity::find_by_id(user_id.to_string())
            .one(db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ThreeKUser::from))
    }
}
