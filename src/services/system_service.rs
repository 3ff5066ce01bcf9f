//! System service - health probing and schema bootstrap.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use common::AppResult;

use crate::config::PRIMARY_DATABASE_LABEL;
use crate::infra::Database;

/// Reachability of the 3K directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ThreeKStatus {
    Connected,
    Unavailable,
    NotConfigured,
}

/// Result of a successful health probe.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthReport {
    /// Primary store clock
    pub timestamp: DateTime<Utc>,
    /// Primary store label
    #[schema(example = "PostgreSQL")]
    pub database: String,
    pub three_k: ThreeKStatus,
}

#[async_trait]
pub trait SystemService: Send + Sync {
    /// Probe the primary store; fails when it cannot be reached.
    async fn health(&self) -> AppResult<HealthReport>;

    /// Apply pending migrations and return the current account count.
    async fn initialize(&self) -> AppResult<u64>;
}

pub struct SystemManager {
    database: Arc<Database>,
    three_k: Option<Arc<Database>>,
}

impl SystemManager {
    pub fn new(database: Arc<Database>, three_k: Option<Arc<Database>>) -> Self {
        Self { database, three_k }
    }

    async fn three_k_status(&self) -> ThreeKStatus {
        match &self.three_k {
            None => ThreeKStatus::NotConfigured,
            Some(db) => match db.ping().await {
                Ok(()) => ThreeKStatus::Connected,
                Err(e) => {
                    tracing::warn!("3K database unreachable: {}", e);
                    ThreeKStatus::Unavailable
                }
            },
        }
    }
}

#[async_trait]
impl SystemService for SystemManager {
    async fn health(&self) -> AppResult<HealthReport> {
        let timestamp = self.database.current_time().await?;

        Ok(HealthReport {
            timestamp,
            database: PRIMARY_DATABASE_LABEL.to_string(),
            three_k: self.three_k_status().await,
        })
    }

    async fn initialize(&self) -> AppResult<u64> {
        self.database.run_migrations().await?;
        let count = self.database.count_users().await?;

        tracing::info!("Database initialized, users table has {} rows", count);
        Ok(count)
    }
}
