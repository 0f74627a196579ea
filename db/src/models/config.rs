use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::ConnectionTrait;
use serde::Serialize;

/// Id of the single configuration row.
pub const CONFIG_ID: i64 = 1;

/// Runtime switches shared by every client.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "configs")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Whether visitors may reserve a ticket without signing in.
    pub login_not_cmu: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn get<C: ConnectionTrait>(db: &C) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(CONFIG_ID).one(db).await
    }

    /// Sets `login_not_cmu`, creating the row if it was removed.
    pub async fn set_login_not_cmu<C: ConnectionTrait>(
        db: &C,
        value: bool,
    ) -> Result<Model, DbErr> {
        match Self::get(db).await? {
            Some(existing) => {
                let mut active: ActiveModel = existing.into();
                active.login_not_cmu = Set(value);
                active.update(db).await
            }
            None => {
                ActiveModel {
                    id: Set(CONFIG_ID),
                    login_not_cmu: Set(value),
                }
                .insert(db)
                .await
            }
        }
    }
}
