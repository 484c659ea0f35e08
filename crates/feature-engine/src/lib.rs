//! Feature Engineering Engine
//!
//! Turns request fields into the fixed-order, scaled feature vectors the
//! regressors were trained on.

mod encoder;
mod features;
mod scaler;

pub use encoder::OneHotEncoder;
pub use features::FeatureVector;
pub use scaler::StandardScaler;

use thiserror::Error;

/// Errors during feature assembly and transformation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Invalid transform parameters: {0}")]
    InvalidParameters(String),
}
