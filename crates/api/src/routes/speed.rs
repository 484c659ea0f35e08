//! Speed Route

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use inference_engine::{PredictorBundle, SpeedInput};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::{telemetry, AppState};

/// Response for `/predictSpeed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedResponse {
    pub accel_x: f64,
    pub accel_y: f64,
    pub predicted_speed_kmph: f64,
    pub model_used: String,
}

/// Predict speed from acceleration
pub async fn predict_speed(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeedInput>, JsonRejection>,
) -> Result<Json<SpeedResponse>, ApiError> {
    let result = speed(&state, payload);
    telemetry::record_outcome("predictSpeed", &result);
    result.map(Json)
}

fn speed(
    state: &AppState,
    payload: Result<Json<SpeedInput>, JsonRejection>,
) -> Result<SpeedResponse, ApiError> {
    let Json(input) = payload?;
    let bundle = state
        .models
        .speed()
        .loaded()
        .ok_or(ApiError::ModelUnavailable("Speed"))?;

    let kmph = bundle.predict_speed(&input)?;

    Ok(SpeedResponse {
        accel_x: input.accel_x,
        accel_y: input.accel_y,
        predicted_speed_kmph: kmph,
        model_used: bundle.model_used().to_string(),
    })
}
