#![cfg(test)]
use std::sync::Arc;

use chrono::NaiveDate;
use migration::MigratorTrait;
use models::db::connect_in_memory;

use crate::repo::SeaOrmStore;
use crate::repository::mock::InMemoryStore;
use crate::Services;

/// Private SQLite database with the schema applied.
pub async fn sqlite_store() -> Result<SeaOrmStore, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(SeaOrmStore::new(db))
}

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap_or_default()
}

/// Services over a fresh in-memory store with the clock pinned to [`fixed_today`].
pub fn memory_services() -> Services {
    Services::from_store_with_clock(Arc::new(InMemoryStore::new()), Arc::new(fixed_today))
}
