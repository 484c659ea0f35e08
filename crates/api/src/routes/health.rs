//! Health and Metrics Routes

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::{ModelSlot, PredictorBundle};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub models: ModelsHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsHealth {
    pub task: ModelHealth,
    pub speed: ModelHealth,
}

/// Load state of one model
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ModelHealth {
    fn from_slot<B: PredictorBundle>(slot: &ModelSlot<B>) -> Self {
        match slot {
            ModelSlot::Loaded(bundle) => Self {
                status: "loaded".to_string(),
                model_name: Some(bundle.model_used().to_string()),
                reason: None,
            },
            ModelSlot::Unavailable { reason } => Self {
                status: "unavailable".to_string(),
                model_name: None,
                reason: Some(reason.clone()),
            },
        }
    }
}

/// Health check handler
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let all_loaded = state.models.task().is_loaded() && state.models.speed().is_loaded();

    Json(HealthResponse {
        status: if all_loaded { "healthy" } else { "degraded" }.to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        models: ModelsHealth {
            task: ModelHealth::from_slot(state.models.task()),
            speed: ModelHealth::from_slot(state.models.speed()),
        },
    })
}

/// Prometheus exposition
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}
