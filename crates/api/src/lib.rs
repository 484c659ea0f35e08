//! Prediction API Server
//!
//! HTTP surface for task completion time, speed and rule-based fault checks.

use axum::{
    routing::{get, post},
    Router,
};
use fault_rules::FaultRuleEngine;
use inference_engine::ModelStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod telemetry;
pub mod routes;

pub use crate::config::{LogFormat, ServerConfig};
pub use crate::error::ApiError;

/// Application state shared across handlers; read-only after startup
pub struct AppState {
    /// Predictor bundles
    pub models: ModelStore,
    /// Fault thresholds and ranges
    pub faults: FaultRuleEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Prometheus handle when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state around an already-built model store
    pub fn new(models: ModelStore) -> Self {
        Self {
            models,
            faults: FaultRuleEngine::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            metrics: None,
        }
    }

    /// Load both models from the configured paths
    pub fn load(config: &ServerConfig) -> Self {
        Self::new(ModelStore::load(
            &config.task_model_path,
            &config.speed_model_path,
        ))
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        telemetry::record_model_status(&self.models);
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predictTaskTime", post(routes::task::predict_task_time))
        .route("/predictSpeed", post(routes::speed::predict_speed))
        .route("/predictFault", post(routes::fault::predict_fault))
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::health::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging; `RUST_LOG` overrides the default `info` level
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = result {
        eprintln!("Logging already initialised: {}", e);
    }
}

/// Serve the router on an already-bound listener
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    cors_enabled: bool,
) -> std::io::Result<()> {
    let mut app = create_router(state);
    if cors_enabled {
        app = app.layer(CorsLayer::permissive());
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Run the server
pub async fn run_server(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind_addr.as_str()).await?;
    info!("Starting API server on {}", listener.local_addr()?);

    serve(listener, Arc::new(state), config.cors_enabled).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
