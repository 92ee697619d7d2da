//! Create `deposit` table.
//!
//! Foreign keys restrict deletion of a referenced bank or client. The
//! term CHECK (1..=600) is looser than the 1..=300 enforced on requests.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deposit::Table)
                    .if_not_exists()
                    .col(pk_auto(Deposit::Id))
                    .col(integer(Deposit::ClientId).not_null())
                    .col(integer(Deposit::BankId).not_null())
                    .col(date(Deposit::OpeningDate).not_null())
                    .col(double(Deposit::Percentage).not_null().check(Expr::col(Deposit::Percentage).gt(0)))
                    .col(integer(Deposit::TermMonths).not_null().check(Expr::col(Deposit::TermMonths).between(1, 600)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deposit_client")
                            .from(Deposit::Table, Deposit::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deposit_bank")
                            .from(Deposit::Table, Deposit::BankId)
                            .to(Bank::Table, Bank::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Deposit::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Deposit { Table, Id, ClientId, BankId, OpeningDate, Percentage, TermMonths }

#[derive(DeriveIden)]
enum Client { Table, Id }

#[derive(DeriveIden)]
enum Bank { Table, Id }
