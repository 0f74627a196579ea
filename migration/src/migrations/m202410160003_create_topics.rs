use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum Topics {
    Table,
    Id,
    TopicTh,
    TopicEn,
    Code,
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202410160003_create_topics"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Topics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Topics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Topics::TopicTh).text().not_null().unique_key())
                    .col(ColumnDef::new(Topics::TopicEn).text().not_null().unique_key())
                    .col(
                        ColumnDef::new(Topics::Code)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Topics::Table).to_owned())
            .await
    }
}
