use sea_orm_migration::prelude::*;

use super::m202410160001_create_counters::Counters;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FirstnameTh,
    LastnameTh,
    FirstnameEn,
    LastnameEn,
    Email,
    CounterId,
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202410160002_create_users"
    }
}

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
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::FirstnameTh).string_len(100).null())
                    .col(ColumnDef::new(Users::LastnameTh).string_len(100).null())
                    .col(ColumnDef::new(Users::FirstnameEn).string_len(100).null())
                    .col(ColumnDef::new(Users::LastnameEn).string_len(100).null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::CounterId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::CounterId)
                            .to(Counters::Table, Counters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
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
