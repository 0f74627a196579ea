use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::Serialize;

/// A service counter staffed by at most one user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "counters")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique counter name shown to visitors.
    #[sea_orm(unique)]
    pub counter: String,
    /// Whether the counter is currently open.
    pub status: bool,
    /// Closing time as `HH:MM:SS`.
    pub time_closed: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user::Entity")]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(db: &C, counter: &str) -> Result<Model, DbErr> {
        ActiveModel {
            counter: Set(counter.to_owned()),
            status: Set(false),
            time_closed: Set("16:00:00".to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
