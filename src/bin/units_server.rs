use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use fleet_console::config::ServerConfig;
use fleet_console::infra::server::routes::build_router;
use fleet_console::logging;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "units server listening");

    axum::serve(listener, build_router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("units server failed")?;

    info!("units server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
