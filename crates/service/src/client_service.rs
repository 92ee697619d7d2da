use std::sync::Arc;

use models::client::{self, ClientFields};
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::query::{filter, ClientCriteria, ClientSortField, Sort, SortField};
use crate::repository::{ClientRepository, DepositRepository};

const ENTITY: &str = "client";

pub struct ClientService {
    clients: Arc<dyn ClientRepository>,
    deposits: Arc<dyn DepositRepository>,
}

impl ClientService {
    pub fn new(clients: Arc<dyn ClientRepository>, deposits: Arc<dyn DepositRepository>) -> Self {
        Self { clients, deposits }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        criteria: ClientCriteria,
        sort_by: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Vec<client::Model>, ServiceError> {
        let sort = Sort::<ClientSortField>::parse(sort_by, direction)?;
        let found = filter(self.clients.find_all(sort).await?, &criteria);
        if found.is_empty() {
            return Err(ServiceError::no_results("clients"));
        }
        debug!(count = found.len(), sort_by = sort.field.name(), direction = ?sort.direction, "clients listed");
        Ok(found)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<client::Model, ServiceError> {
        self.clients.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ClientFields) -> Result<client::Model, ServiceError> {
        if self.clients.exists_by_name(&input.name).await? {
            return Err(ServiceError::already_exists(ENTITY, "name", input.name));
        }
        let created = self.clients.insert(input).await?;
        info!(client_id = created.id, legal_form = created.legal_form.code(), "client_created");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update(&self, id: i32, input: ClientFields) -> Result<client::Model, ServiceError> {
        let existing = self.get(id).await?;
        let updated = self
            .clients
            .update(client::Model {
                name: input.name,
                short_name: input.short_name,
                address: input.address,
                legal_form: input.legal_form,
                ..existing
            })
            .await?;
        info!(client_id = id, "client_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.get(id).await?;
        if self.deposits.exists_by_client_id(id).await? {
            return Err(ServiceError::referential_block(ENTITY, id));
        }
        self.clients.delete(id).await?;
        info!(client_id = id, "client_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BankInput, ClientInput, DepositInput};
    use crate::errors::{ConflictKind, NotFoundKind};
    use crate::test_support::{fixed_today, memory_services};
    use models::LegalForm;

    fn fields(name: &str, short_name: Option<&str>, address: Option<&str>, legal_form: &str) -> ClientFields {
        ClientInput {
            name: Some(name.into()),
            short_name: short_name.map(Into::into),
            address: address.map(Into::into),
            legal_form: Some(legal_form.into()),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_get_and_duplicate_name() -> anyhow::Result<()> {
        let svc = memory_services();
        let created = svc.clients.create(fields("Ромашка", Some("Ром"), None, "OOO")).await?;
        assert_eq!(created.legal_form, LegalForm::Ooo);
        assert_eq!(svc.clients.get(created.id).await?, created);

        let err = svc.clients.create(fields("Ромашка", None, None, "ИП")).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Conflict(ConflictKind::AlreadyExists { entity: "client", field: "name", ref value }) if value == "Ромашка"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_overwrites_optional_fields() -> anyhow::Result<()> {
        let svc = memory_services();
        let created = svc.clients.create(fields("Иванов", Some("Ив"), Some("Тверь"), "IP")).await?;

        let updated = svc.clients.update(created.id, fields("Иванов И.", None, None, "ПАО")).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.short_name, None);
        assert_eq!(updated.address, None);
        assert_eq!(updated.legal_form, LegalForm::Pao);
        assert_eq!(svc.clients.get(created.id).await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_skips_missing_optional_values() -> anyhow::Result<()> {
        let svc = memory_services();
        svc.clients.create(fields("Без адреса", None, None, "AO")).await?;
        let with_address = svc.clients.create(fields("С адресом", None, Some("Казань, Баумана 5"), "AO")).await?;

        let found = svc
            .clients
            .list(ClientCriteria { address: Some("казань".into()), ..Default::default() }, None, None)
            .await?;
        assert_eq!(found, vec![with_address]);

        let by_form = svc
            .clients
            .list(ClientCriteria { legal_form: Some(LegalForm::Ao), ..Default::default() }, Some("name"), Some("DESC"))
            .await?;
        assert_eq!(by_form.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["С адресом", "Без адреса"]);

        let err = svc
            .clients
            .list(ClientCriteria { legal_form: Some(LegalForm::Gup), ..Default::default() }, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(NotFoundKind::NoResults { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_guard_and_repeat() -> anyhow::Result<()> {
        let svc = memory_services();
        let owner = svc.clients.create(fields("Вкладчик", None, None, "IP")).await?;
        let idle = svc.clients.create(fields("Без вкладов", None, None, "IP")).await?;
        let bank = svc.banks.create(BankInput::new("Банк", "123123123").validate()?).await?;
        svc.deposits
            .create(
                DepositInput {
                    client_id: Some(owner.id),
                    bank_id: Some(bank.id),
                    opening_date: Some(fixed_today()),
                    percentage: Some(5.0),
                    term_months: Some(6),
                }
                .validate(fixed_today())?,
            )
            .await?;

        let err = svc.clients.delete(owner.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ConflictKind::ReferentialBlock { entity: "client", .. })));

        svc.clients.delete(idle.id).await?;
        let err = svc.clients.delete(idle.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(NotFoundKind::EntityNotFound { entity: "client", .. })));
        Ok(())
    }
}
