use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A ticket in a topic's queue.
///
/// `no` is unique within `topic_id` (enforced by `idx_queues_topic_no`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "queues")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ticket number, `<topic code><zero padded sequence>`.
    pub no: String,
    pub student_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub topic_id: i64,
    pub note: Option<String>,
    pub status: QueueStatus,
    pub counter_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum QueueStatus {
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "CALLING")]
    Calling,
    #[sea_orm(string_value = "SUCCESS")]
    Success,
    #[sea_orm(string_value = "CANCEL")]
    Cancel,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::topic::Entity",
        from = "Column::TopicId",
        to = "super::topic::Column::Id"
    )]
    Topic,

    #[sea_orm(
        belongs_to = "super::counter::Entity",
        from = "Column::CounterId",
        to = "super::counter::Column::Id"
    )]
    Counter,
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl Related<super::counter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Counter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a new `WAITING` ticket stamped with the current time.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        no: &str,
        first_name: &str,
        last_name: &str,
        topic_id: i64,
        note: Option<&str>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            no: Set(no.to_owned()),
            student_id: Set(None),
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            topic_id: Set(topic_id),
            note: Set(note.map(str::to_owned)),
            status: Set(QueueStatus::Waiting),
            counter_id: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// The most recently created ticket of a topic. Ties on `created_at` go to
    /// the higher id.
    pub async fn latest_for_topic<C: ConnectionTrait>(
        db: &C,
        topic_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::TopicId.eq(topic_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .one(db)
            .await
    }
}
