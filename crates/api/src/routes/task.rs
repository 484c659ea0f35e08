//! Task Completion Time Route

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use inference_engine::{PredictorBundle, TaskInput};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::{telemetry, AppState};

/// Response for `/predictTaskTime`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTimeResponse {
    pub task_name: String,
    pub predicted_time_minutes: f64,
    pub model_used: String,
}

/// Predict task completion time
pub async fn predict_task_time(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<TaskTimeResponse>, ApiError> {
    let result = task_time(&state, payload);
    telemetry::record_outcome("predictTaskTime", &result);
    result.map(Json)
}

fn task_time(
    state: &AppState,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<TaskTimeResponse, ApiError> {
    let Json(input) = payload?;
    let bundle = state
        .models
        .task()
        .loaded()
        .ok_or(ApiError::ModelUnavailable("Task"))?;

    let minutes = bundle.predict_task_time(&input)?;

    Ok(TaskTimeResponse {
        task_name: input.task_name,
        predicted_time_minutes: minutes,
        model_used: bundle.model_used().to_string(),
    })
}
