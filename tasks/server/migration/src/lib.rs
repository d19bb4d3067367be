pub use sea_orm_migration::prelude::*;

mod m20240105_120000_create_task_table;
mod m20240112_090000_add_unique_description;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240105_120000_create_task_table::Migration),
            Box::new(m20240112_090000_add_unique_description::Migration),
        ]
    }
}
