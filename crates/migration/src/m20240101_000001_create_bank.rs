//! Create `bank` table.
//!
//! `name` and `bik` carry unique constraints; the service checks them first
//! for a friendlier error and these constraints catch the races.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bank::Table)
                    .if_not_exists()
                    .col(pk_auto(Bank::Id))
                    .col(string_len(Bank::Name, 255).unique_key().not_null())
                    .col(string_len(Bank::Bik, 9).unique_key().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bank::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bank { Table, Id, Name, Bik }
