//! Predictor Bundles
//!
//! A bundle is a regressor plus the transforms and metadata it was trained
//! with. Bundles are validated as a whole on load: a bundle that exists is
//! internally consistent.

use crate::regressor::{LinearRegressor, OnnxRegressor, Regressor};
use crate::InferenceError;
use feature_engine::{OneHotEncoder, StandardScaler};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Numeric task fields appended after the encoded task name:
/// engine_hours, fuel_used, load_cycles, idling_time
pub const TASK_NUMERIC_FEATURES: usize = 4;

/// Speed features: accel_x, accel_y
pub const SPEED_FEATURES: usize = 2;

/// Common surface of the loadable bundles
pub trait PredictorBundle: Sized {
    /// Capability name used in logs and health reports
    const CAPABILITY: &'static str;

    /// Load and validate a bundle from an artifact file
    fn load(path: &Path) -> Result<Self, InferenceError>;

    /// Display name stored with the trained model
    fn model_name(&self) -> Option<&str>;

    /// Label reported as `model_used`
    fn model_used(&self) -> &str {
        self.model_name().unwrap_or("Unknown")
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RegressorArtifact {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Onnx {
        path: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct BundleArtifact {
    model_name: Option<String>,
    regressor: RegressorArtifact,
    scaler: StandardScaler,
    encoder: Option<OneHotEncoder>,
    feature_names: Option<Vec<String>>,
}

impl BundleArtifact {
    fn read(path: &Path) -> Result<Self, InferenceError> {
        let text = fs::read_to_string(path).map_err(|source| InferenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| InferenceError::Artifact {
            path: path.display().to_string(),
            source,
        })
    }

    /// Build the regressor; ONNX paths are resolved against the artifact's directory
    fn build_regressor(
        artifact: RegressorArtifact,
        artifact_path: &Path,
        input_dim: usize,
    ) -> Result<Regressor, InferenceError> {
        match artifact {
            RegressorArtifact::Linear {
                coefficients,
                intercept,
            } => Ok(Regressor::Linear(LinearRegressor::new(coefficients, intercept)?)),
            RegressorArtifact::Onnx { path } => {
                let resolved = match artifact_path.parent() {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path,
                };
                Ok(Regressor::Onnx(OnnxRegressor::load(&resolved, input_dim)?))
            }
        }
    }
}

fn check_regressor_width(regressor: &Regressor, scaler: &StandardScaler) -> Result<(), InferenceError> {
    if regressor.input_dim() != scaler.dimension() {
        return Err(InferenceError::SchemaMismatch(format!(
            "regressor expects {} features but scaler has {}",
            regressor.input_dim(),
            scaler.dimension()
        )));
    }
    Ok(())
}

/// Task completion time predictor
#[derive(Debug)]
pub struct TaskBundle {
    model_name: Option<String>,
    pub(crate) regressor: Regressor,
    pub(crate) scaler: StandardScaler,
    pub(crate) encoder: OneHotEncoder,
}

impl TaskBundle {
    /// Assemble a bundle from already-built parts
    pub fn new(
        model_name: Option<String>,
        regressor: Regressor,
        scaler: StandardScaler,
        encoder: OneHotEncoder,
    ) -> Result<Self, InferenceError> {
        let expected = encoder.width() + TASK_NUMERIC_FEATURES;
        if scaler.dimension() != expected {
            return Err(InferenceError::SchemaMismatch(format!(
                "task scaler has {} features, expected {} ({} task names + {} numeric)",
                scaler.dimension(),
                expected,
                encoder.width(),
                TASK_NUMERIC_FEATURES
            )));
        }
        check_regressor_width(&regressor, &scaler)?;

        Ok(Self {
            model_name,
            regressor,
            scaler,
            encoder,
        })
    }

    /// Task names the encoder was fitted on
    pub fn task_names(&self) -> &[String] {
        self.encoder.categories()
    }

    pub fn knows_task(&self, task_name: &str) -> bool {
        self.encoder.contains(task_name)
    }
}

impl PredictorBundle for TaskBundle {
    const CAPABILITY: &'static str = "task";

    fn load(path: &Path) -> Result<Self, InferenceError> {
        let artifact = BundleArtifact::read(path)?;
        let encoder = artifact.encoder.ok_or_else(|| {
            InferenceError::SchemaMismatch("task artifact has no encoder".to_string())
        })?;
        let regressor =
            BundleArtifact::build_regressor(artifact.regressor, path, artifact.scaler.dimension())?;
        let bundle = Self::new(artifact.model_name, regressor, artifact.scaler, encoder)?;

        info!(
            "Loaded task model '{}' from {} ({} task names)",
            bundle.model_used(),
            path.display(),
            bundle.task_names().len()
        );
        Ok(bundle)
    }

    fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }
}

/// Speed predictor
#[derive(Debug)]
pub struct SpeedBundle {
    model_name: Option<String>,
    pub(crate) regressor: Regressor,
    pub(crate) scaler: StandardScaler,
    feature_names: Vec<String>,
}

impl SpeedBundle {
    pub fn new(
        model_name: Option<String>,
        regressor: Regressor,
        scaler: StandardScaler,
        feature_names: Vec<String>,
    ) -> Result<Self, InferenceError> {
        if feature_names.len() != SPEED_FEATURES {
            return Err(InferenceError::SchemaMismatch(format!(
                "speed model lists {} feature names, expected {}",
                feature_names.len(),
                SPEED_FEATURES
            )));
        }
        if scaler.dimension() != SPEED_FEATURES {
            return Err(InferenceError::SchemaMismatch(format!(
                "speed scaler has {} features, expected {}",
                scaler.dimension(),
                SPEED_FEATURES
            )));
        }
        check_regressor_width(&regressor, &scaler)?;

        Ok(Self {
            model_name,
            regressor,
            scaler,
            feature_names,
        })
    }

    /// Feature names in training order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

impl PredictorBundle for SpeedBundle {
    const CAPABILITY: &'static str = "speed";

    fn load(path: &Path) -> Result<Self, InferenceError> {
        let artifact = BundleArtifact::read(path)?;
        let feature_names = artifact.feature_names.ok_or_else(|| {
            InferenceError::SchemaMismatch("speed artifact has no feature_names".to_string())
        })?;
        let regressor =
            BundleArtifact::build_regressor(artifact.regressor, path, artifact.scaler.dimension())?;
        let bundle = Self::new(artifact.model_name, regressor, artifact.scaler, feature_names)?;

        info!(
            "Loaded speed model '{}' from {} (features: {:?})",
            bundle.model_used(),
            path.display(),
            bundle.feature_names()
        );
        Ok(bundle)
    }

    fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }
}
