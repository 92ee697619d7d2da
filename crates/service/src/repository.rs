use async_trait::async_trait;
use models::client::ClientFields;
use models::deposit::{DepositDetails, DepositFields};
use models::{bank, client};

use crate::domain::BankDraft;
use crate::errors::ServiceError;
use crate::query::{BankSortField, ClientSortField, DepositSortField, Sort};

/// Persistence for banks. `find_all` returns the whole table in `sort` order.
#[async_trait]
pub trait BankRepository: Send + Sync {
    async fn find_all(&self, sort: Sort<BankSortField>) -> Result<Vec<bank::Model>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<bank::Model>, ServiceError>;
    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError>;
    async fn exists_by_bik(&self, bik: &str) -> Result<bool, ServiceError>;
    async fn insert(&self, draft: BankDraft) -> Result<bank::Model, ServiceError>;
    async fn update(&self, bank: bank::Model) -> Result<bank::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_all(&self, sort: Sort<ClientSortField>) -> Result<Vec<client::Model>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<client::Model>, ServiceError>;
    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError>;
    async fn insert(&self, fields: ClientFields) -> Result<client::Model, ServiceError>;
    async fn update(&self, client: client::Model) -> Result<client::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// Deposits are always handed out with their client and bank attached.
#[async_trait]
pub trait DepositRepository: Send + Sync {
    async fn find_all(&self, sort: Sort<DepositSortField>) -> Result<Vec<DepositDetails>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<DepositDetails>, ServiceError>;
    async fn insert(&self, fields: DepositFields) -> Result<DepositDetails, ServiceError>;
    async fn update(&self, id: i32, fields: DepositFields) -> Result<DepositDetails, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    async fn exists_by_bank_id(&self, bank_id: i32) -> Result<bool, ServiceError>;
    async fn exists_by_client_id(&self, client_id: i32) -> Result<bool, ServiceError>;
}

/// In-memory store for tests and local runs. Emulates the schema's unique,
/// foreign-key and restrict-on-delete constraints.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    use models::deposit;

    use crate::errors::ConflictKind;

    #[derive(Default)]
    struct Tables {
        banks: BTreeMap<i32, bank::Model>,
        clients: BTreeMap<i32, client::Model>,
        deposits: BTreeMap<i32, deposit::Model>,
        bank_seq: i32,
        client_seq: i32,
        deposit_seq: i32,
    }

    impl Tables {
        fn details(&self, row: &deposit::Model) -> Result<DepositDetails, ServiceError> {
            let client = self.clients.get(&row.client_id).cloned().ok_or_else(|| {
                ServiceError::Db(format!("deposit {} references missing client {}", row.id, row.client_id))
            })?;
            let bank = self.banks.get(&row.bank_id).cloned().ok_or_else(|| {
                ServiceError::Db(format!("deposit {} references missing bank {}", row.id, row.bank_id))
            })?;
            Ok(DepositDetails::from_parts(row.clone(), client, bank))
        }

        fn check_references(&self, fields: &DepositFields) -> Result<(), ServiceError> {
            if !self.clients.contains_key(&fields.client_id) || !self.banks.contains_key(&fields.bank_id) {
                return Err(ServiceError::Db("FOREIGN KEY constraint failed".into()));
            }
            Ok(())
        }
    }

    fn unique_violation(constraint: &str) -> ServiceError {
        ServiceError::Conflict(ConflictKind::UniqueViolation(format!("UNIQUE constraint failed: {constraint}")))
    }

    #[derive(Default)]
    pub struct InMemoryStore {
        tables: Mutex<Tables>,
    }

    impl InMemoryStore {
        pub fn new() -> Self { Self::default() }

        fn lock(&self) -> Result<MutexGuard<'_, Tables>, ServiceError> {
            self.tables.lock().map_err(|e| ServiceError::Db(format!("store lock poisoned: {e}")))
        }
    }

    #[async_trait]
    impl BankRepository for InMemoryStore {
        async fn find_all(&self, sort: Sort<BankSortField>) -> Result<Vec<bank::Model>, ServiceError> {
            let mut rows: Vec<bank::Model> = self.lock()?.banks.values().cloned().collect();
            sort.sort(&mut rows);
            Ok(rows)
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<bank::Model>, ServiceError> {
            Ok(self.lock()?.banks.get(&id).cloned())
        }

        async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
            Ok(self.lock()?.banks.values().any(|b| b.name == name))
        }

        async fn exists_by_bik(&self, bik: &str) -> Result<bool, ServiceError> {
            Ok(self.lock()?.banks.values().any(|b| b.bik == bik))
        }

        async fn insert(&self, draft: BankDraft) -> Result<bank::Model, ServiceError> {
            let mut t = self.lock()?;
            if t.banks.values().any(|b| b.name == draft.name) {
                return Err(unique_violation("bank.name"));
            }
            if t.banks.values().any(|b| b.bik == draft.bik) {
                return Err(unique_violation("bank.bik"));
            }
            t.bank_seq += 1;
            let row = bank::Model { id: t.bank_seq, name: draft.name, bik: draft.bik };
            t.banks.insert(row.id, row.clone());
            Ok(row)
        }

        async fn update(&self, bank: bank::Model) -> Result<bank::Model, ServiceError> {
            let mut t = self.lock()?;
            if !t.banks.contains_key(&bank.id) {
                return Err(ServiceError::Db("None of the records are updated".into()));
            }
            let others = || t.banks.values().filter(|b| b.id != bank.id);
            if others().any(|b| b.name == bank.name) {
                return Err(unique_violation("bank.name"));
            }
            if others().any(|b| b.bik == bank.bik) {
                return Err(unique_violation("bank.bik"));
            }
            t.banks.insert(bank.id, bank.clone());
            Ok(bank)
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            let mut t = self.lock()?;
            if t.deposits.values().any(|d| d.bank_id == id) {
                return Err(ServiceError::Db("FOREIGN KEY constraint failed".into()));
            }
            t.banks.remove(&id);
            Ok(())
        }
    }

    #[async_trait]
    impl ClientRepository for InMemoryStore {
        async fn find_all(&self, sort: Sort<ClientSortField>) -> Result<Vec<client::Model>, ServiceError> {
            let mut rows: Vec<client::Model> = self.lock()?.clients.values().cloned().collect();
            sort.sort(&mut rows);
            Ok(rows)
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<client::Model>, ServiceError> {
            Ok(self.lock()?.clients.get(&id).cloned())
        }

        async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
            Ok(self.lock()?.clients.values().any(|c| c.name == name))
        }

        async fn insert(&self, fields: ClientFields) -> Result<client::Model, ServiceError> {
            let mut t = self.lock()?;
            if t.clients.values().any(|c| c.name == fields.name) {
                return Err(unique_violation("client.name"));
            }
            t.client_seq += 1;
            let row = client::Model {
                id: t.client_seq,
                name: fields.name,
                short_name: fields.short_name,
                address: fields.address,
                legal_form: fields.legal_form,
            };
            t.clients.insert(row.id, row.clone());
            Ok(row)
        }

        async fn update(&self, client: client::Model) -> Result<client::Model, ServiceError> {
            let mut t = self.lock()?;
            if !t.clients.contains_key(&client.id) {
                return Err(ServiceError::Db("None of the records are updated".into()));
            }
            if t.clients.values().any(|c| c.id != client.id && c.name == client.name) {
                return Err(unique_violation("client.name"));
            }
            t.clients.insert(client.id, client.clone());
            Ok(client)
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            let mut t = self.lock()?;
            if t.deposits.values().any(|d| d.client_id == id) {
                return Err(ServiceError::Db("FOREIGN KEY constraint failed".into()));
            }
            t.clients.remove(&id);
            Ok(())
        }
    }

    #[async_trait]
    impl DepositRepository for InMemoryStore {
        async fn find_all(&self, sort: Sort<DepositSortField>) -> Result<Vec<DepositDetails>, ServiceError> {
            let t = self.lock()?;
            let mut rows = t.deposits.values().map(|d| t.details(d)).collect::<Result<Vec<_>, _>>()?;
            sort.sort(&mut rows);
            Ok(rows)
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<DepositDetails>, ServiceError> {
            let t = self.lock()?;
            let found = t.deposits.get(&id).map(|d| t.details(d)).transpose();
            found
        }

        async fn insert(&self, fields: DepositFields) -> Result<DepositDetails, ServiceError> {
            let mut t = self.lock()?;
            t.check_references(&fields)?;
            t.deposit_seq += 1;
            let row = deposit::Model {
                id: t.deposit_seq,
                client_id: fields.client_id,
                bank_id: fields.bank_id,
                opening_date: fields.opening_date,
                percentage: fields.percentage,
                term_months: fields.term_months,
            };
            t.deposits.insert(row.id, row.clone());
            t.details(&row)
        }

        async fn update(&self, id: i32, fields: DepositFields) -> Result<DepositDetails, ServiceError> {
            let mut t = self.lock()?;
            if !t.deposits.contains_key(&id) {
                return Err(ServiceError::Db("None of the records are updated".into()));
            }
            t.check_references(&fields)?;
            let row = deposit::Model {
                id,
                client_id: fields.client_id,
                bank_id: fields.bank_id,
                opening_date: fields.opening_date,
                percentage: fields.percentage,
                term_months: fields.term_months,
            };
            t.deposits.insert(id, row.clone());
            t.details(&row)
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.lock()?.deposits.remove(&id);
            Ok(())
        }

        async fn exists_by_bank_id(&self, bank_id: i32) -> Result<bool, ServiceError> {
            Ok(self.lock()?.deposits.values().any(|d| d.bank_id == bank_id))
        }

        async fn exists_by_client_id(&self, client_id: i32) -> Result<bool, ServiceError> {
            Ok(self.lock()?.deposits.values().any(|d| d.client_id == client_id))
        }
    }
}
