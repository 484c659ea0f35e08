//! Fault Check Route

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use fault_rules::{FaultAssessment, FaultInput};
use std::sync::Arc;

use crate::error::ApiError;
use crate::{telemetry, AppState};

/// Rule-based fault check on raw temperature and humidity
pub async fn predict_fault(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FaultInput>, JsonRejection>,
) -> Result<Json<FaultAssessment>, ApiError> {
    let result = payload
        .map_err(ApiError::from)
        .and_then(|Json(input)| state.faults.evaluate(&input).map_err(ApiError::from));
    telemetry::record_outcome("predictFault", &result);
    result.map(Json)
}
