//! Migration: Store `users.reset_code_expires` as TIMESTAMPTZ.
//!
//! Tables created by older deployments declare the column as a plain
//! TIMESTAMP holding UTC wall-clock values. Fresh schemas already use
//! TIMESTAMPTZ and are left untouched.

use sea_orm_migration::prelude::*;

const ALTER_RESET_CODE_EXPIRES: &str = r#"
DO $$
BEGIN
    IF EXISTS (
        SELECT 1
        FROM information_schema.columns
        WHERE table_schema = current_schema()
          AND table_name = 'users'
          AND column_name = 'reset_code_expires'
          AND data_type = 'timestamp without time zone'
    ) THEN
        ALTER TABLE users
            ALTER COLUMN reset_code_expires TYPE TIMESTAMPTZ
            USING reset_code_expires AT TIME ZONE 'UTC';
    END IF;
END
$$
"#;

/// Legacy tables allow NULL audit timestamps.
const BACKFILL_TIMESTAMPS: [&str; 4] = [
    "UPDATE users SET created_at = CURRENT_TIMESTAMP WHERE created_at IS NULL",
    "UPDATE users SET updated_at = CURRENT_TIMESTAMP WHERE updated_at IS NULL",
    "ALTER TABLE users ALTER COLUMN created_at SET NOT NULL",
    "ALTER TABLE users ALTER COLUMN updated_at SET NOT NULL",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ALTER_RESET_CODE_EXPIRES).await?;
        for sql in BACKFILL_TIMESTAMPS {
            db.execute_unprepared(sql).await?;
        }

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // The entity decodes TIMESTAMPTZ only; nothing to revert.
        Ok(())
    }
}
