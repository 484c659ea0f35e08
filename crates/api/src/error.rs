//! HTTP Error Mapping

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fault_rules::FaultRuleError;
use inference_engine::PredictionError;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Request failures, each with a fixed status code
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, out-of-range reading or unknown task name
    #[error("{0}")]
    InvalidInput(String),
    /// The named model failed to load at startup
    #[error("{0} prediction model not loaded.")]
    ModelUnavailable(&'static str),
    /// Encoding, scaling or inference failed
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelUnavailable(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Metrics label
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::ModelUnavailable(_) => "model_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        match err {
            PredictionError::InvalidInput(message) => ApiError::InvalidInput(message),
            internal @ PredictionError::InternalFailure(_) => ApiError::Internal(internal.to_string()),
        }
    }
}

impl From<FaultRuleError> for ApiError {
    fn from(err: FaultRuleError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected: {}", self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
