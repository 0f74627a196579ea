use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202410160001_create_counters::Migration),
            Box::new(migrations::m202410160002_create_users::Migration),
            Box::new(migrations::m202410160003_create_topics::Migration),
            Box::new(migrations::m202410160004_create_queues::Migration),
            Box::new(migrations::m202410160005_create_configs::Migration),
        ]
    }
}
