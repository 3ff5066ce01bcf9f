//! 3K directory entity (MySQL `users`, read-only).

use sea_orm::entity::prelude::*;

use domain::ThreeKUser;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub token_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ThreeKUser {
    fn from(model: Model) -> Self {
        ThreeKUser {
            user_id: model.user_id,
            name: model.name,
            email: model.email,
            token_id: model.token_id,
        }
    }
}
