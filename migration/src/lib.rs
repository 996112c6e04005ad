pub use sea_orm_migration::prelude::*;

mod m20260112_000001_create_reminder_table;
mod m20260112_000002_create_poll_table;
mod m20260112_000003_create_giveaway_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260112_000001_create_reminder_table::Migration),
            Box::new(m20260112_000002_create_poll_table::Migration),
            Box::new(m20260112_000003_create_giveaway_table::Migration),
        ]
    }
}
