//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_bank;
mod m20240101_000002_create_client;
mod m20240101_000003_create_deposit;
mod m20240101_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_bank::Migration),
            Box::new(m20240101_000002_create_client::Migration),
            // deposit references both bank and client
            Box::new(m20240101_000003_create_deposit::Migration),
            Box::new(m20240101_000004_add_indexes::Migration),
        ]
    }
}
