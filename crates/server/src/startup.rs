use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, StoreBackend};
use models::TableName;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Load and validate configuration once for the whole process.
/// A missing table name is fatal here, before anything binds.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Connect the configured store and build the router around it.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let table = TableName::new(cfg.store.table_name.clone())
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    if cfg.store.backend == StoreBackend::File {
        common::env::ensure_data_dir(&cfg.store.data_dir).await?;
    }
    let store = service::store::connect(&cfg.store).await?;
    info!(%table, backend = ?cfg.store.backend, "visit store ready");

    let state = AppState::new(store, table, &cfg.server.allow_origin);
    Ok(routes::build_router(state, routes::build_cors(&cfg.server.allow_origin)))
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting visit counter server");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("received Ctrl+C, draining connections");
        })
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
