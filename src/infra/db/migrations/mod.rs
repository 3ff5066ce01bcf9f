//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_add_updated_at_trigger;
mod m20240101_000003_reset_code_expires_timestamptz;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_add_updated_at_trigger::Migration),
            Box::new(m20240101_000003_reset_code_expires_timestamptz::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_run_in_order() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "m20240101_000001_create_users_table",
                "m20240101_000002_add_updated_at_trigger",
                "m20240101_000003_reset_code_expires_timestamptz",
            ]
        );
    }
}
