use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use service::{repo::SeaOrmStore, Services};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load config once, with `.env` applied, for both logging and `run`.
pub fn load_config() -> Result<AppConfig, StartupError> {
    dotenvy::dotenv().ok();
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))
}

/// Connect, migrate, and serve until the task is dropped. Logging is
/// expected to be installed already.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let services = Services::from_store(Arc::new(SeaOrmStore::new(db)));
    let app: Router = routes::build_router(ServerState::new(services), build_cors());

    let bind = cfg.server.bind_addr();
    let addr: SocketAddr = bind.parse().map_err(|_| StartupError::BindAddr(bind.clone()))?;
    info!(%addr, "starting bank registry server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
