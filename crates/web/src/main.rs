//! unisearch web UI entry point.
//!
//! Serves a small search front-end over the UniFuncs API: a form page on
//! GET / and an HTML results page on POST /search. The API key must be
//! resolvable at startup; per-request overrides come in through the form.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use unisearch_client::{UniFuncsClient, UniFuncsConfig};
use unisearch_core::AppConfig;

mod render;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;
    let api_key = config.resolve_api_key(None)?;

    let client = UniFuncsClient::new(UniFuncsConfig {
        api_key: api_key.clone(),
        base_url: config.base_url.clone(),
        timeout: config.timeout(),
        user_agent: config.user_agent.clone(),
    })?;

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(routes::AppState { config, api_key, client });
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    tracing::info!("unisearch web UI listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
