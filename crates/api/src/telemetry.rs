//! Prometheus Metrics

use crate::error::ApiError;
use inference_engine::ModelStore;
use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::warn;

/// Install the global Prometheus recorder
pub fn install_recorder() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to install metrics recorder: {}", e);
            None
        }
    }
}

/// Count a finished prediction request by endpoint and outcome
pub fn record_outcome<T>(endpoint: &'static str, result: &Result<T, ApiError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    counter!("predictions_total", "endpoint" => endpoint, "outcome" => outcome).increment(1);
}

/// Publish which models loaded at startup
pub fn record_model_status(models: &ModelStore) {
    let loaded = |is_loaded: bool| if is_loaded { 1.0 } else { 0.0 };
    gauge!("model_loaded", "model" => "task").set(loaded(models.task().is_loaded()));
    gauge!("model_loaded", "model" => "speed").set(loaded(models.speed().is_loaded()));
}
