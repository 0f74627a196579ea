use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::Serialize;

/// A service topic visitors queue for. `code` prefixes every ticket number
/// issued for the topic.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    #[serde(rename = "topicTH")]
    pub topic_th: String,
    #[sea_orm(unique)]
    #[serde(rename = "topicEN")]
    pub topic_en: String,
    #[sea_orm(unique)]
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::queue::Entity")]
    Queue,
}

impl Related<super::queue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Queue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        topic_th: &str,
        topic_en: &str,
        code: &str,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            topic_th: Set(topic_th.to_owned()),
            topic_en: Set(topic_en.to_owned()),
            code: Set(code.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Takes the write lock on topic `id` for the rest of the transaction
    /// with a no-op update. Returns `false` when the topic does not exist.
    ///
    /// On SQLite this must be the first statement of the transaction so the
    /// later reads run under the lock instead of on an older snapshot.
    pub async fn lock<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::Code, Expr::col(Column::Code).into())
            .filter(Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Returns the ticket-number prefix of topic `id`, if the topic exists.
    pub async fn find_code<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<String>, DbErr> {
        Ok(Entity::find_by_id(id).one(db).await?.map(|t| t.code))
    }
}
