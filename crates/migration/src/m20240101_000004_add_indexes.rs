use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Deposit: the deletion guards look deposits up by either reference
        manager
            .create_index(
                Index::create()
                    .name("idx_deposit_client")
                    .table(Deposit::Table)
                    .col(Deposit::ClientId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_deposit_bank")
                    .table(Deposit::Table)
                    .col(Deposit::BankId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_deposit_client").table(Deposit::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_deposit_bank").table(Deposit::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Deposit { Table, ClientId, BankId }
