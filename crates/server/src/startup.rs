use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use migration::{Migrator, MigratorTrait};
use models::db::{self, DatabaseConfig};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolve configuration: `config.toml` (or `CONFIG_PATH`) first, then env vars.
pub fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unavailable, falling back to environment");
            AppConfig::from_env()
        }
    }
}

fn parse_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address '{raw}': {e}")))
}

/// Connect to the database, apply migrations and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = db::connect_with_config(&DatabaseConfig::from(&cfg.database)).await?;
    db::test_connection(&db).await?;

    if cfg.database.run_migrations {
        Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;
        info!("database migrations applied");
    }

    Ok(routes::build_router(ServerState::from_db(db), build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl_c");
        return;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let addr = parse_bind_addr(&cfg)?;
    let app = build_app(&cfg).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "student registry listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
