use std::sync::Arc;

use chrono::{Local, NaiveDate};
use models::deposit::{DepositDetails, DepositFields};
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::query::{filter, DepositCriteria, DepositSortField, Sort, SortField};
use crate::repository::{BankRepository, ClientRepository, DepositRepository};

const ENTITY: &str = "deposit";

/// Source of "today" for opening dates.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct DepositService {
    deposits: Arc<dyn DepositRepository>,
    clients: Arc<dyn ClientRepository>,
    banks: Arc<dyn BankRepository>,
    clock: Clock,
}

impl DepositService {
    pub fn new(
        deposits: Arc<dyn DepositRepository>,
        clients: Arc<dyn ClientRepository>,
        banks: Arc<dyn BankRepository>,
    ) -> Self {
        Self { deposits, clients, banks, clock: Arc::new(local_today) }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        criteria: DepositCriteria,
        sort_by: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Vec<DepositDetails>, ServiceError> {
        let sort = Sort::<DepositSortField>::parse(sort_by, direction)?;
        let found = filter(self.deposits.find_all(sort).await?, &criteria);
        if found.is_empty() {
            return Err(ServiceError::no_results("deposits"));
        }
        debug!(count = found.len(), sort_by = sort.field.name(), direction = ?sort.direction, "deposits listed");
        Ok(found)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<DepositDetails, ServiceError> {
        self.deposits.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    /// Client first, then bank; the first missing one is reported.
    async fn resolve_references(&self, fields: &DepositFields) -> Result<(), ServiceError> {
        if self.clients.find_by_id(fields.client_id).await?.is_none() {
            return Err(ServiceError::not_found("client", fields.client_id));
        }
        if self.banks.find_by_id(fields.bank_id).await?.is_none() {
            return Err(ServiceError::not_found("bank", fields.bank_id));
        }
        Ok(())
    }

    /// The opening date is always today, whatever the caller sent.
    #[instrument(skip(self, input), fields(client_id = input.client_id, bank_id = input.bank_id))]
    pub async fn create(&self, input: DepositFields) -> Result<DepositDetails, ServiceError> {
        self.resolve_references(&input).await?;
        let fields = DepositFields { opening_date: self.today(), ..input };
        let created = self.deposits.insert(fields).await?;
        info!(deposit_id = created.id, opening_date = %created.opening_date, "deposit_created");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(client_id = input.client_id, bank_id = input.bank_id))]
    pub async fn update(&self, id: i32, input: DepositFields) -> Result<DepositDetails, ServiceError> {
        self.get(id).await?;
        self.resolve_references(&input).await?;
        let updated = self.deposits.update(id, input).await?;
        info!(deposit_id = id, "deposit_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.get(id).await?;
        self.deposits.delete(id).await?;
        info!(deposit_id = id, "deposit_deleted");
        Ok(())
    }
}
