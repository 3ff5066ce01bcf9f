//! Migration: Create the `users` account table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string_len(255).null())
                    .col(ColumnDef::new(Users::UserId).string_len(255).null())
                    .col(ColumnDef::new(Users::ReferrerId).string_len(255).null())
                    .col(ColumnDef::new(Users::TokenId).string_len(255).null())
                    .col(ColumnDef::new(Users::PlanA).json_binary().null())
                    .col(ColumnDef::new(Users::ProfilePicture).text().null())
                    .col(ColumnDef::new(Users::ProfileMediaType).string_len(50).null())
                    .col(ColumnDef::new(Users::ResetCode).string_len(6).null())
                    .col(
                        ColumnDef::new(Users::ResetCodeExpires)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_user_id")
                    .table(Users::Table)
                    .col(Users::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    UserId,
    ReferrerId,
    TokenId,
    PlanA,
    ProfilePicture,
    ProfileMediaType,
    ResetCode,
    ResetCodeExpires,
    CreatedAt,
    UpdatedAt,
}
