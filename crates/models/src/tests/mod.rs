

use sea_orm::DatabaseConnection;

use crate::db::connect_in_memory;
use migration::MigratorTrait;

/// Fresh database with every migration applied.
pub(crate) async fn migrated_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
