//! Prediction Service Client
//!
//! Thin async client used by backends that forward dashboard requests to the
//! prediction service.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the service base URL
pub const BASE_URL_ENV: &str = "PREDICTION_API_BASE_URL";

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0} is not set")]
    MissingBaseUrl(&'static str),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Prediction service returned {status}: {detail}")]
    Api { status: StatusCode, detail: String },
}

/// Task completion time request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub task_name: String,
    pub engine_hours: f64,
    pub fuel_used: f64,
    pub load_cycles: i64,
    pub idling_time: f64,
}

/// Speed request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRequest {
    pub accel_x: f64,
    pub accel_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct FaultRequest {
    temperature: f64,
    humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTimePrediction {
    pub task_name: String,
    pub predicted_time_minutes: f64,
    pub model_used: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedPrediction {
    pub accel_x: f64,
    pub accel_y: f64,
    pub predicted_speed_kmph: f64,
    pub model_used: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultPrediction {
    pub temperature: f64,
    pub humidity: f64,
    pub fault_code: u8,
    pub fault_status: String,
    pub rule_based: bool,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Client for the prediction endpoints
#[derive(Debug, Clone)]
pub struct PredictionClient {
    base_url: String,
    http: reqwest::Client,
}

impl PredictionClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Create a client from `PREDICTION_API_BASE_URL`
    pub fn from_env() -> Result<Self, ClientError> {
        std::env::var(BASE_URL_ENV)
            .map(Self::new)
            .map_err(|_| ClientError::MissingBaseUrl(BASE_URL_ENV))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn predict_task_time(
        &self,
        request: &TaskRequest,
    ) -> Result<TaskTimePrediction, ClientError> {
        self.post("/predictTaskTime", request).await
    }

    pub async fn predict_speed(&self, request: &SpeedRequest) -> Result<SpeedPrediction, ClientError> {
        self.post("/predictSpeed", request).await
    }

    /// Rule-based fault check; missing readings are sent as 0
    pub async fn predict_fault(
        &self,
        temperature: Option<f64>,
        humidity: Option<f64>,
    ) -> Result<FaultPrediction, ClientError> {
        let request = FaultRequest {
            temperature: temperature.unwrap_or(0.0),
            humidity: humidity.unwrap_or(0.0),
        };
        self.post("/predictFault", &request).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await?;
        let detail = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(ErrorBody {
                detail: serde_json::Value::String(message),
            }) => message,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) => text,
        };
        Err(ClientError::Api { status, detail })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalised() {
        let client = PredictionClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_fault_request_shape() {
        let body = serde_json::to_value(FaultRequest {
            temperature: 0.0,
            humidity: 42.5,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"temperature": 0.0, "humidity": 42.5}));
    }
}
