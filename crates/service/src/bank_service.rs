use std::sync::Arc;

use models::bank;
use tracing::{debug, info, instrument};

use crate::domain::BankDraft;
use crate::errors::ServiceError;
use crate::query::{filter, BankCriteria, BankSortField, Sort, SortField};
use crate::repository::{BankRepository, DepositRepository};

const ENTITY: &str = "bank";

/// Bank business rules: uniqueness of name and BIK on create, deletion
/// blocked while deposits reference the bank.
pub struct BankService {
    banks: Arc<dyn BankRepository>,
    deposits: Arc<dyn DepositRepository>,
}

impl BankService {
    pub fn new(banks: Arc<dyn BankRepository>, deposits: Arc<dyn DepositRepository>) -> Self {
        Self { banks, deposits }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        criteria: BankCriteria,
        sort_by: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Vec<bank::Model>, ServiceError> {
        let sort = Sort::<BankSortField>::parse(sort_by, direction)?;
        let all = self.banks.find_all(sort).await?;
        let found = filter(all, &criteria);
        if found.is_empty() {
            return Err(ServiceError::no_results("banks"));
        }
        debug!(count = found.len(), sort_by = sort.field.name(), direction = ?sort.direction, "banks listed");
        Ok(found)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<bank::Model, ServiceError> {
        self.banks.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    #[instrument(skip(self, draft), fields(name = %draft.name, bik = %draft.bik))]
    pub async fn create(&self, draft: BankDraft) -> Result<bank::Model, ServiceError> {
        if self.banks.exists_by_name(&draft.name).await? {
            return Err(ServiceError::already_exists(ENTITY, "name", draft.name));
        }
        if self.banks.exists_by_bik(&draft.bik).await? {
            return Err(ServiceError::already_exists(ENTITY, "bik", draft.bik));
        }
        let created = self.banks.insert(draft).await?;
        info!(bank_id = created.id, "bank_created");
        Ok(created)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name, bik = %draft.bik))]
    pub async fn update(&self, id: i32, draft: BankDraft) -> Result<bank::Model, ServiceError> {
        let existing = self.get(id).await?;
        let updated = self
            .banks
            .update(bank::Model { name: draft.name, bik: draft.bik, ..existing })
            .await?;
        info!(bank_id = id, "bank_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.get(id).await?;
        if self.deposits.exists_by_bank_id(id).await? {
            return Err(ServiceError::referential_block(ENTITY, id));
        }
        self.banks.delete(id).await?;
        info!(bank_id = id, "bank_deleted");
        Ok(())
    }
}
