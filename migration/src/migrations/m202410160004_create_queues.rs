use sea_orm_migration::prelude::*;

use super::m202410160001_create_counters::Counters;
use super::m202410160003_create_topics::Topics;

#[derive(DeriveIden)]
enum Queues {
    Table,
    Id,
    No,
    StudentId,
    FirstName,
    LastName,
    TopicId,
    Note,
    Status,
    CounterId,
    CreatedAt,
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202410160004_create_queues"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Queues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Queues::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Queues::No).string_len(20).not_null())
                    .col(ColumnDef::new(Queues::StudentId).string_len(9).null())
                    .col(ColumnDef::new(Queues::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Queues::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Queues::TopicId).big_integer().not_null())
                    .col(ColumnDef::new(Queues::Note).string_len(255).null())
                    .col(
                        ColumnDef::new(Queues::Status)
                            .string_len(20)
                            .not_null()
                            .default("WAITING"),
                    )
                    .col(ColumnDef::new(Queues::CounterId).big_integer().null())
                    .col(
                        ColumnDef::new(Queues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Queues::Table, Queues::TopicId)
                            .to(Topics::Table, Topics::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Queues::Table, Queues::CounterId)
                            .to(Counters::Table, Counters::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // A ticket number is unique within its topic; concurrent reservations
        // that compute the same number fail here and retry.
        manager
            .create_index(
                Index::create()
                    .name("idx_queues_topic_no")
                    .table(Queues::Table)
                    .col(Queues::TopicId)
                    .col(Queues::No)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_queues_topic_created")
                    .table(Queues::Table)
                    .col(Queues::TopicId)
                    .col(Queues::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Queues::Table).to_owned())
            .await
    }
}
