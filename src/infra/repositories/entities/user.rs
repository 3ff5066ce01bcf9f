//! Account database entity for SeaORM (Postgres `users`).

use sea_orm::entity::prelude::*;

use domain::{Account, Credential};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub user_id: Option<String>,
    pub referrer_id: Option<String>,
    pub token_id: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub plan_a: Option<Json>,
    #[sea_orm(column_type = "Text", nullable)]
    pub profile_picture: Option<String>,
    pub profile_media_type: Option<String>,
    pub reset_code: Option<String>,
    pub reset_code_expires: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Account {
            id: model.id,
            name: model.name,
            email: model.email,
            credential: Credential::from_stored(model.password_hash),
            user_id: model.user_id,
            referrer_id: model.referrer_id,
            token_id: model.token_id,
            plan_data: model.plan_a,
            profile_picture: model.profile_picture,
            profile_media_type: model.profile_media_type,
            reset_code: model.reset_code,
            reset_code_expires: model.reset_code_expires,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
