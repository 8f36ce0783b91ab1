use anyhow::Context;
use eta_core::EtaConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod handlers;
mod middleware;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = EtaConfig::load().context("cannot load config")?;
    let state = AppState::init(&cfg).context("cannot create token maker")?;

    let app = routes::create_router(state);

    tracing::info!("eta-server listening on {}", cfg.server.bind);

    let listener = TcpListener::bind(&cfg.server.bind)
        .await
        .with_context(|| format!("cannot bind {}", cfg.server.bind))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
