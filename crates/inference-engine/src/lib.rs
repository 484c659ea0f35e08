//! Regression Inference Engine
//!
//! Loads the task-time and speed predictor bundles once at startup and runs
//! the scale-then-regress transform for each request.

mod bundle;
mod predictor;
mod regressor;
mod store;

pub use bundle::{PredictorBundle, SpeedBundle, TaskBundle, SPEED_FEATURES, TASK_NUMERIC_FEATURES};
pub use predictor::{round2, SpeedInput, TaskInput};
pub use regressor::{LinearRegressor, OnnxRegressor, Regressor};
pub use store::{ModelSlot, ModelStore};

use feature_engine::FeatureError;
use thiserror::Error;

/// Errors while loading bundles or running a regressor
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed artifact {path}: {source}")]
    Artifact {
        path: String,
        source: serde_json::Error,
    },
    #[error("Artifact schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// Outcome of a failed prediction request.
///
/// `InvalidInput` is the caller's fault; `InternalFailure` wraps anything that
/// went wrong during encoding, scaling or inference.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Prediction failed: {0}")]
    InternalFailure(#[from] InferenceError),
}

impl PredictionError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PredictionError::InvalidInput(_))
    }
}
