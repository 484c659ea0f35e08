//! Regressor Backends

use crate::InferenceError;
use std::fmt;
use std::path::Path;
use tracing::info;
use tract_onnx::prelude::*;

/// Trained regression model
#[derive(Debug)]
pub enum Regressor {
    /// Linear model exported as coefficients and intercept
    Linear(LinearRegressor),
    /// ONNX graph executed with tract
    Onnx(OnnxRegressor),
}

impl Regressor {
    /// Number of input features expected
    pub fn input_dim(&self) -> usize {
        match self {
            Regressor::Linear(r) => r.coefficients.len(),
            Regressor::Onnx(r) => r.input_dim,
        }
    }

    /// Predict a single scalar from a scaled feature row
    pub fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.input_dim() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.input_dim(),
                actual: features.len(),
            });
        }

        match self {
            Regressor::Linear(r) => Ok(r.predict(features)),
            Regressor::Onnx(r) => r.predict(features),
        }
    }
}

/// `y = w . x + b`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, InferenceError> {
        if coefficients.is_empty() {
            return Err(InferenceError::SchemaMismatch(
                "linear regressor has no coefficients".to_string(),
            ));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(InferenceError::SchemaMismatch(
                "linear regressor parameters must be finite".to_string(),
            ));
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    fn predict(&self, features: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (w, x)| acc + w * x)
    }
}

/// ONNX regressor with a `[1, n]` f32 input and a single scalar output
pub struct OnnxRegressor {
    plan: TypedRunnableModel<TypedModel>,
    input_dim: usize,
}

impl fmt::Debug for OnnxRegressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxRegressor")
            .field("input_dim", &self.input_dim)
            .finish_non_exhaustive()
    }
}

impl OnnxRegressor {
    /// Load and optimise an ONNX graph for a fixed input width
    pub fn load(path: &Path, input_dim: usize) -> Result<Self, InferenceError> {
        info!("Loading ONNX regressor from {}", path.display());

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, input_dim]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                InferenceError::ModelLoadError(format!("{}: {:#}", path.display(), e))
            })?;

        Ok(Self { plan, input_dim })
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        let row: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let input = Tensor::from_shape(&[1, self.input_dim], &row)
            .map_err(|e| InferenceError::InferenceFailed(format!("{:#}", e)))?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(format!("{:#}", e)))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("model produced no outputs".to_string()))?;
        let values = output
            .cast_to::<f64>()
            .map_err(|e| InferenceError::InferenceFailed(format!("{:#}", e)))?;
        let view = values
            .to_array_view::<f64>()
            .map_err(|e| InferenceError::InferenceFailed(format!("{:#}", e)))?;

        view.iter()
            .next()
            .copied()
            .ok_or_else(|| InferenceError::InferenceFailed("model output is empty".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_prediction() {
        let regressor = Regressor::Linear(LinearRegressor::new(vec![2.0, -1.0], 0.5).unwrap());
        let y = regressor.predict(&[3.0, 4.0]).unwrap();
        assert!((y - 2.5).abs() < 1e-12);
        assert_eq!(regressor.input_dim(), 2);
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        let regressor = Regressor::Linear(LinearRegressor::new(vec![1.0, 1.0], 0.0).unwrap());
        let err = regressor.predict(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::InvalidInputShape {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_linear_rejects_non_finite() {
        assert!(LinearRegressor::new(vec![f64::INFINITY], 0.0).is_err());
        assert!(LinearRegressor::new(vec![1.0], f64::NAN).is_err());
        assert!(LinearRegressor::new(vec![], 0.0).is_err());
    }

    #[test]
    fn test_missing_onnx_file() {
        let err = OnnxRegressor::load(Path::new("does-not-exist.onnx"), 2).unwrap_err();
        assert!(matches!(err, InferenceError::ModelLoadError(_)));
    }
}
