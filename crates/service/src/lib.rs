//! Service layer for the bank registry.
//! - `query`: criteria filtering and sort keys, pure and store-agnostic.
//! - `repository`: store traits plus an in-memory implementation; `repo` holds the SeaORM one.
//! - `*_service`: the business rules for each resource.

use std::sync::Arc;

pub mod errors;
pub mod domain;
pub mod query;
pub mod repository;
pub mod repo;
pub mod bank_service;
pub mod client_service;
pub mod deposit_service;
#[cfg(test)]
pub mod test_support;

pub use bank_service::BankService;
pub use client_service::ClientService;
pub use deposit_service::{Clock, DepositService};

use repository::{BankRepository, ClientRepository, DepositRepository};

/// The three resource services, sharing one store.
#[derive(Clone)]
pub struct Services {
    pub banks: Arc<BankService>,
    pub clients: Arc<ClientService>,
    pub deposits: Arc<DepositService>,
}

impl Services {
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: BankRepository + ClientRepository + DepositRepository + 'static,
    {
        Self::from_store_with_clock(store, Arc::new(deposit_service::local_today))
    }

    pub fn from_store_with_clock<S>(store: Arc<S>, clock: Clock) -> Self
    where
        S: BankRepository + ClientRepository + DepositRepository + 'static,
    {
        Self {
            banks: Arc::new(BankService::new(store.clone(), store.clone())),
            clients: Arc::new(ClientService::new(store.clone(), store.clone())),
            deposits: Arc::new(DepositService::new(store.clone(), store.clone(), store).with_clock(clock)),
        }
    }
}
