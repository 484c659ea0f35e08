//! Task Time and Speed Prediction

use crate::bundle::{SpeedBundle, TaskBundle, SPEED_FEATURES, TASK_NUMERIC_FEATURES};
use crate::{InferenceError, PredictionError};
use feature_engine::FeatureVector;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Task completion time request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub task_name: String,
    pub engine_hours: f64,
    pub fuel_used: f64,
    #[serde(deserialize_with = "whole_number")]
    pub load_cycles: i64,
    pub idling_time: f64,
}

/// Accepts `4` and `4.0`; rejects `4.5`
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Int(i64),
        Float(f64),
    }

    match Count::deserialize(deserializer)? {
        Count::Int(n) => Ok(n),
        Count::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        Count::Float(f) => Err(D::Error::custom(format!(
            "expected a whole number, got {}",
            f
        ))),
    }
}

/// Speed request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedInput {
    pub accel_x: f64,
    pub accel_y: f64,
}

/// Round to two decimal places the way Python's `round(x, 2)` does: the
/// exact binary value is rounded, so `2.675` becomes `2.67`.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

fn finite(value: f64) -> Result<f64, InferenceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InferenceError::InferenceFailed(format!(
            "model returned non-finite value {}",
            value
        )))
    }
}

/// Python list repr of the task names, e.g. `['Digging', 'Loading']`
fn format_names(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("[{}]", quoted.join(", "))
}

impl TaskBundle {
    /// Predict task completion time in minutes
    pub fn predict_task_time(&self, input: &TaskInput) -> Result<f64, PredictionError> {
        if !self.knows_task(&input.task_name) {
            return Err(PredictionError::InvalidInput(format!(
                "Invalid task name. Available: {}",
                format_names(self.task_names())
            )));
        }

        let encoded = self
            .encoder
            .transform(&input.task_name)
            .map_err(InferenceError::from)?;

        let mut features = FeatureVector::with_capacity(encoded.len() + TASK_NUMERIC_FEATURES);
        features
            .extend_from_slice(&encoded)
            .push(input.engine_hours)
            .push(input.fuel_used)
            .push(input.load_cycles as f64)
            .push(input.idling_time);

        let scaled = self.scaler.transform(&features).map_err(InferenceError::from)?;
        let raw = finite(self.regressor.predict(scaled.as_slice())?)?;
        let minutes = round2(raw);

        debug!(
            "Task prediction: task={} raw={} rounded={}",
            input.task_name, raw, minutes
        );
        Ok(minutes)
    }
}

impl SpeedBundle {
    /// Predict speed in km/h
    pub fn predict_speed(&self, input: &SpeedInput) -> Result<f64, PredictionError> {
        let mut features = FeatureVector::with_capacity(SPEED_FEATURES);
        features.push(input.accel_x).push(input.accel_y);

        let scaled = self.scaler.transform(&features).map_err(InferenceError::from)?;
        let raw = finite(self.regressor.predict(scaled.as_slice())?)?;
        let kmph = round2(raw);

        debug!(
            "Speed prediction: accel=({}, {}) raw={} rounded={}",
            input.accel_x, input.accel_y, raw, kmph
        );
        Ok(kmph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regressor::{LinearRegressor, Regressor};
    use feature_engine::{OneHotEncoder, StandardScaler};

    fn task_bundle() -> TaskBundle {
        // Features: [Digging, Loading, engine_hours, fuel_used, load_cycles, idling_time]
        TaskBundle::new(
            Some("LinearRegression".to_string()),
            Regressor::Linear(
                LinearRegressor::new(vec![5.0, 10.0, 1.0, 0.5, 2.0, -1.0], 3.0).unwrap(),
            ),
            StandardScaler::new(
                vec![0.0, 0.0, 100.0, 20.0, 0.0, 0.0],
                vec![1.0, 1.0, 10.0, 2.0, 1.0, 1.0],
            )
            .unwrap(),
            OneHotEncoder::new(vec!["Digging".to_string(), "Loading".to_string()]).unwrap(),
        )
        .unwrap()
    }

    fn speed_bundle(coefficients: Vec<f64>, intercept: f64) -> SpeedBundle {
        SpeedBundle::new(
            None,
            Regressor::Linear(LinearRegressor::new(coefficients, intercept).unwrap()),
            StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap(),
            vec!["accel_x".to_string(), "accel_y".to_string()],
        )
        .unwrap()
    }

    fn task_input(name: &str) -> TaskInput {
        TaskInput {
            task_name: name.to_string(),
            engine_hours: 120.0,
            fuel_used: 24.0,
            load_cycles: 3,
            idling_time: 1.5,
        }
    }

    #[test]
    fn test_task_prediction_follows_feature_order() {
        // scaled: [0, 1, 2.0, 2.0, 3, 1.5]
        // y = 3 + 10 + 2 + 1 + 6 - 1.5 = 20.5
        let minutes = task_bundle().predict_task_time(&task_input("Loading")).unwrap();
        assert_eq!(minutes, 20.5);
    }

    #[test]
    fn test_unknown_task_lists_available_names() {
        let err = task_bundle()
            .predict_task_time(&task_input("Welding"))
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "Invalid task name. Available: ['Digging', 'Loading']"
        );
    }

    #[test]
    fn test_speed_prediction_is_rounded() {
        let bundle = speed_bundle(vec![1.0, 1.0], 0.0);
        let kmph = bundle
            .predict_speed(&SpeedInput {
                accel_x: 10.0,
                accel_y: 2.3456,
            })
            .unwrap();
        assert_eq!(kmph, 12.35);
    }

    #[test]
    fn test_non_finite_output_is_internal_failure() {
        let bundle = speed_bundle(vec![1.0e308, 1.0e308], 0.0);
        let err = bundle
            .predict_speed(&SpeedInput {
                accel_x: 10.0,
                accel_y: 10.0,
            })
            .unwrap_err();
        assert!(!err.is_invalid_input());
        assert!(err.to_string().starts_with("Prediction failed: "));
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let bundle = task_bundle();
        let input = task_input("Digging");
        let first = bundle.predict_task_time(&input).unwrap();
        for _ in 0..10 {
            assert_eq!(bundle.predict_task_time(&input).unwrap(), first);
        }
    }

    #[test]
    fn test_round2_matches_binary_rounding() {
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(-3.14159), -3.14);
        assert_eq!(round2(42.0), 42.0);
        assert_eq!(round2(0.016), 0.02);
    }

    #[test]
    fn test_load_cycles_accepts_integral_float() {
        let body = r#"{"task_name":"Digging","engine_hours":1.0,"fuel_used":2.0,"load_cycles":4.0,"idling_time":0.5}"#;
        let input: TaskInput = serde_json::from_str(body).unwrap();
        assert_eq!(input.load_cycles, 4);

        let body = r#"{"task_name":"Digging","engine_hours":1.0,"fuel_used":2.0,"load_cycles":4,"idling_time":0.5}"#;
        let input: TaskInput = serde_json::from_str(body).unwrap();
        assert_eq!(input.load_cycles, 4);
    }

    #[test]
    fn test_load_cycles_rejects_fraction() {
        for cycles in ["4.5", "\"4\"", "null"] {
            let body = format!(
                r#"{{"task_name":"Digging","engine_hours":1.0,"fuel_used":2.0,"load_cycles":{},"idling_time":0.5}}"#,
                cycles
            );
            assert!(serde_json::from_str::<TaskInput>(&body).is_err(), "{}", cycles);
        }
    }
}
