//! 3K directory service.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::ThreeKUser;

use crate::infra::ThreeKRepository;

#[async_trait]
pub trait ThreeKService: Send + Sync {
    /// `Ok(None)` on a miss; `Err` only when the directory cannot be reached.
    async fn lookup(&self, user_id: &str) -> AppResult<Option<ThreeKUser>>;
}

pub struct ThreeKDirectory {
    repo: Arc<dyn ThreeKRepository>,
}

impl ThreeKDirectory {
    pub fn new(repo: Arc<dyn ThreeKRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ThreeKService for ThreeKDirectory {
    async fn lookup(&self, user_id: &str) -> AppResult<Option<ThreeKUser>> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::validation("User ID is required"));
        }

        self.repo.find_by_user_id(user_id).await
    }
}
