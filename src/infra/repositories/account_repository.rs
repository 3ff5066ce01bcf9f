//! Account repository over the Postgres `users` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::entities::user::{self, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::Account;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
///
/// Every lookup and write is keyed by email except `find_by_user_id`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// List all accounts
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// Find account by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Find account by external user id
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Account>>;

    /// Store a reset code on the matching row. Returns rows affected.
    async fn set_reset_code(
        &self,
        email: &str,
        code: String,
        expires_at: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// Overwrite the display name, optionally clearing both picture fields.
    async fn update_profile(
        &self,
        email: &str,
        name: String,
        remove_picture: bool,
    ) -> AppResult<Option<Account>>;

    /// Overwrite the stored credential. Returns rows affected.
    async fn update_credential(&self, email: &str, stored: String) -> AppResult<u64>;
}

/// Concrete implementation of AccountRepository
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn list(&self) -> AppResult<Vec<Account>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Account::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Account>> {
        let result = UserEntity::find()
            .filter(user::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn set_reset_code(
        &self,
        email: &str,
        code: String,
        expires_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::ResetCode, Expr::value(code))
            .col_expr(user::Column::ResetCodeExpires, Expr::value(expires_at))
            .filter(user::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn update_profile(
        &self,
        email: &str,
        name: String,
        remove_picture: bool,
    ) -> AppResult<Option<Account>> {
        let mut update = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(name))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()));

        if remove_picture {
            update = update
                .col_expr(user::Column::ProfilePicture, Expr::value(Option::<String>::None))
                .col_expr(
                    user::Column::ProfileMediaType,
                    Expr::value(Option::<String>::None),
                );
        }

        let models = update
            .filter(user::Column::Email.eq(email))
            .exec_with_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().next().map(Account::from))
    }

    async fn update_credential(&self, email: &str, stored: String) -> AppResult<u64> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(stored))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Statement, Value};

    fn row(email: &str) -> user::Model {
        let now = Utc::now();
        user::Model {
            id: 1,
            name: "Bob".to_string(),
            email: email.to_string(),
            password_hash: Some("secret".to_string()),
            user_id: Some("U1".to_string()),
            referrer_id: None,
            token_id: None,
            plan_a: None,
            profile_picture: None,
            profile_media_type: None,
            reset_code: None,
            reset_code_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn only_statement(db: DatabaseConnection) -> Statement {
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let statements = log[0].statements();
        assert_eq!(statements.len(), 1);
        statements[0].clone()
    }

    fn values(stmt: &Statement) -> Vec<Value> {
        stmt.values.clone().map(|v| v.0).unwrap_or_default()
    }

    fn text(value: &str) -> Value {
        Value::String(Some(Box::new(value.to_string())))
    }

    #[tokio::test]
    async fn test_update_profile_clears_both_picture_fields_in_one_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row("a@example.com")]])
            .into_connection();
        let store = AccountStore::new(db);

        let account = store
            .update_profile("a@example.com", "Alice".to_string(), true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.email, "a@example.com");

        let stmt = only_statement(store.db);
        assert!(stmt.sql.starts_with(r#"UPDATE "users" SET "name" = $1"#));
        assert!(stmt.sql.contains(r#""profile_picture" = $3"#));
        assert!(stmt.sql.contains(r#""profile_media_type" = $4"#));
        assert!(stmt.sql.contains(r#"WHERE "users"."email" = $5"#));
        assert!(stmt.sql.contains("RETURNING"));

        let values = values(&stmt);
        assert_eq!(values.len(), 5);
        assert_eq!(values[0], text("Alice"));
        assert_eq!(values[2], Value::String(None));
        assert_eq!(values[3], Value::String(None));
        assert_eq!(values[4], text("a@example.com"));
    }

    #[tokio::test]
    async fn test_update_profile_keeps_picture_unless_removed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row("a@example.com")]])
            .into_connection();
        let store = AccountStore::new(db);

        store
            .update_profile("a@example.com", "Alice".to_string(), false)
            .await
            .unwrap();

        let stmt = only_statement(store.db);
        assert!(!stmt.sql.contains(r#""profile_picture" = $"#));
        assert!(stmt.sql.contains(r#"WHERE "users"."email" = $3"#));
        assert_eq!(values(&stmt).len(), 3);
    }

    #[tokio::test]
    async fn test_update_profile_unknown_email_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let store = AccountStore::new(db);

        let result = store
            .update_profile("ghost@example.com", "Ghost".to_string(), true)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_set_reset_code_on_unknown_email_changes_no_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let store = AccountStore::new(db);
        let expires_at = Utc::now();

        let affected = store
            .set_reset_code("ghost@example.com", "AB12CD".to_string(), expires_at)
            .await
            .unwrap();
        assert_eq!(affected, 0);

        let stmt = only_statement(store.db);
        assert!(stmt.sql.contains(r#""reset_code" = $1"#));
        assert!(stmt.sql.contains(r#""reset_code_expires" = $2"#));
        assert!(stmt.sql.contains(r#"WHERE "users"."email" = $3"#));
        assert_eq!(
            values(&stmt),
            vec![
                text("AB12CD"),
                Value::ChronoDateTimeUtc(Some(Box::new(expires_at))),
                text("ghost@example.com"),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_credential_binds_email_last() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let store = AccountStore::new(db);

        let affected = store
            .update_credential("a@example.com", "new-secret".to_string())
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let stmt = only_statement(store.db);
        let values = values(&stmt);
        assert_eq!(values.first(), Some(&text("new-secret")));
        assert_eq!(values.last(), Some(&text("a@example.com")));
    }

    #[tokio::test]
    async fn test_find_by_email_filters_on_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row("a@example.com")]])
            .into_connection();
        let store = AccountStore::new(db);

        let account = store.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(account.user_id.as_deref(), Some("U1"));

        let stmt = only_statement(store.db);
        assert!(stmt.sql.contains(r#"WHERE "users"."email" = $1"#));
        assert_eq!(values(&stmt)[0], text("a@example.com"));
    }
}
