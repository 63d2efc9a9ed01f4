/// Server setup and initialization
///
/// Wires together storage, registries and HTTP routes, and owns the registry
/// lifecycle: loaded at startup, cleared at shutdown.

use crate::{
    api::{create_component_routes, create_workflow_routes, AppState},
    config::Config,
    registry::{ComponentRegistry, RegistryStorage, WorkflowRegistry},
};
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Build the registries described by `config`
///
/// With a database URL the registries write through to SQLite and start from
/// its current contents; otherwise they start empty and live in memory only.
pub async fn create_state(config: &Config) -> Result<AppState> {
    let Some(url) = &config.database.url else {
        tracing::info!("📋 No database configured, registries are memory-only");
        return Ok(AppState::in_memory());
    };

    tracing::info!("🗄️ Opening registry database: {}", url);
    let storage = RegistryStorage::connect(url).await?;

    let components = Arc::new(ComponentRegistry::with_storage(Some(storage.clone())));
    let workflows = Arc::new(WorkflowRegistry::with_storage(Some(storage)));

    tracing::info!("📥 Loading registries from storage");
    components
        .init_from_storage()
        .await
        .context("failed to load components from storage")?;
    workflows
        .init_from_storage()
        .await
        .context("failed to load workflows from storage")?;

    Ok(AppState { components, workflows })
}

/// Create the main Axum application with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .merge(create_component_routes())
        .merge(create_workflow_routes())
        .with_state(state)
}

/// Start the HTTP server with the given configuration
///
/// Runs until Ctrl-C, then drains in-flight requests and clears the registries.
pub async fn start_server(config: Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting agentdeck server...");

    let state = create_state(&config).await?;
    let app = create_router(state.clone());

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.clear().await;
    tracing::info!("✅ Registries cleared, server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn health_check() -> &'static str {
    "ok"
}
