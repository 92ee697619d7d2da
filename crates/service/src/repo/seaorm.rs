use async_trait::async_trait;
use sea_orm::sea_query::NullOrdering;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder, Select};

use models::client::ClientFields;
use models::deposit::{self, DepositDetails, DepositFields};
use models::{bank, client};

use crate::domain::BankDraft;
use crate::errors::ServiceError;
use crate::query::{BankSortField, ClientSortField, DepositSortField, Direction, Sort};
use crate::repository::{BankRepository, ClientRepository, DepositRepository};

/// Store backed by the relational database. Sorting happens in SQL;
/// filtering is left to the query engine.
#[derive(Clone)]
pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn order(direction: Direction) -> Order {
    match direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    }
}

// NULLs rank below every value, as in the in-memory store
fn nulls(direction: Direction) -> NullOrdering {
    match direction {
        Direction::Asc => NullOrdering::First,
        Direction::Desc => NullOrdering::Last,
    }
}

fn sorted<E, C>(select: Select<E>, column: C, direction: Direction, id: C) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    select.order_by_with_nulls(column, order(direction), nulls(direction)).order_by_asc(id)
}

#[async_trait]
impl BankRepository for SeaOrmStore {
    async fn find_all(&self, sort: Sort<BankSortField>) -> Result<Vec<bank::Model>, ServiceError> {
        let column = match sort.field {
            BankSortField::Id => bank::Column::Id,
            BankSortField::Name => bank::Column::Name,
            BankSortField::Bik => bank::Column::Bik,
        };
        Ok(sorted(bank::Entity::find(), column, sort.direction, bank::Column::Id).all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<bank::Model>, ServiceError> {
        Ok(bank::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        let found = bank::Entity::find().filter(bank::Column::Name.eq(name)).one(&self.db).await?;
        Ok(found.is_some())
    }

    async fn exists_by_bik(&self, bik: &str) -> Result<bool, ServiceError> {
        let found = bank::Entity::find().filter(bank::Column::Bik.eq(bik)).one(&self.db).await?;
        Ok(found.is_some())
    }

    async fn insert(&self, draft: BankDraft) -> Result<bank::Model, ServiceError> {
        Ok(bank::create(&self.db, &draft.name, &draft.bik).await?)
    }

    async fn update(&self, bank: bank::Model) -> Result<bank::Model, ServiceError> {
        Ok(bank::update(&self.db, bank).await?)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        bank::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl ClientRepository for SeaOrmStore {
    async fn find_all(&self, sort: Sort<ClientSortField>) -> Result<Vec<client::Model>, ServiceError> {
        let column = match sort.field {
            ClientSortField::Id => client::Column::Id,
            ClientSortField::Name => client::Column::Name,
            ClientSortField::ShortName => client::Column::ShortName,
            ClientSortField::Address => client::Column::Address,
            ClientSortField::LegalForm => client::Column::LegalForm,
        };
        Ok(sorted(client::Entity::find(), column, sort.direction, client::Column::Id).all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<client::Model>, ServiceError> {
        Ok(client::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        let found = client::Entity::find().filter(client::Column::Name.eq(name)).one(&self.db).await?;
        Ok(found.is_some())
    }

    async fn insert(&self, fields: ClientFields) -> Result<client::Model, ServiceError> {
        Ok(client::create(&self.db, fields).await?)
    }

    async fn update(&self, client: client::Model) -> Result<client::Model, ServiceError> {
        Ok(client::update(&self.db, client).await?)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        client::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

impl SeaOrmStore {
    async fn single_details(&self, row: deposit::Model) -> Result<DepositDetails, ServiceError> {
        let id = row.id;
        deposit::attach_references(&self.db, vec![row])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::Db(format!("deposit {id} vanished while loading references")))
    }
}

#[async_trait]
impl DepositRepository for SeaOrmStore {
    async fn find_all(&self, sort: Sort<DepositSortField>) -> Result<Vec<DepositDetails>, ServiceError> {
        let column = match sort.field {
            DepositSortField::Id => deposit::Column::Id,
            DepositSortField::ClientId => deposit::Column::ClientId,
            DepositSortField::BankId => deposit::Column::BankId,
            DepositSortField::OpeningDate => deposit::Column::OpeningDate,
            DepositSortField::Percentage => deposit::Column::Percentage,
            DepositSortField::TermMonths => deposit::Column::TermMonths,
        };
        let rows = sorted(deposit::Entity::find(), column, sort.direction, deposit::Column::Id).all(&self.db).await?;
        Ok(deposit::attach_references(&self.db, rows).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<DepositDetails>, ServiceError> {
        match deposit::Entity::find_by_id(id).one(&self.db).await? {
            Some(row) => Ok(Some(self.single_details(row).await?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, fields: DepositFields) -> Result<DepositDetails, ServiceError> {
        let row = deposit::create(&self.db, fields).await?;
        self.single_details(row).await
    }

    async fn update(&self, id: i32, fields: DepositFields) -> Result<DepositDetails, ServiceError> {
        let row = deposit::update(&self.db, id, fields).await?;
        self.single_details(row).await
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        deposit::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn exists_by_bank_id(&self, bank_id: i32) -> Result<bool, ServiceError> {
        let found = deposit::Entity::find().filter(deposit::Column::BankId.eq(bank_id)).one(&self.db).await?;
        Ok(found.is_some())
    }

    async fn exists_by_client_id(&self, client_id: i32) -> Result<bool, ServiceError> {
        let found = deposit::Entity::find().filter(deposit::Column::ClientId.eq(client_id)).one(&self.db).await?;
        Ok(found.is_some())
    }
}
