//! Prediction Service - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, telemetry, AppState, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("failed to load configuration")?;
    init_logging(config.log_format);

    info!("=== Prediction Service v{} ===", env!("CARGO_PKG_VERSION"));

    let mut state = AppState::load(&config);
    if config.metrics_enabled {
        if let Some(handle) = telemetry::install_recorder() {
            state = state.with_metrics(handle);
        }
    }

    run_server(&config, state)
        .await
        .with_context(|| format!("server on {} failed", config.bind_addr))?;

    Ok(())
}
