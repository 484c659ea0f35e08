//! Rule-Based Fault Detection
//!
//! Classifies raw temperature and humidity readings with fixed thresholds.
//! No learned model is involved.

mod rules;

pub use rules::{FaultAssessment, FaultCode, FaultInput, FaultRuleEngine, FaultThresholds};

use data_validator::ValidationError;
use thiserror::Error;

/// Errors from the fault rules
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FaultRuleError {
    /// One or both readings fell outside the accepted range
    #[error("{}", range_message(.temperature, .humidity))]
    OutOfRange {
        temperature: (f64, f64),
        humidity: (f64, f64),
        violations: Vec<ValidationError>,
    },
}

/// One sentence when both readings share a range, one clause per reading otherwise
fn range_message(temperature: &(f64, f64), humidity: &(f64, f64)) -> String {
    if temperature == humidity {
        format!(
            "Temperature and humidity must be between {} and {}.",
            temperature.0, temperature.1
        )
    } else {
        format!(
            "Temperature must be between {} and {} and humidity must be between {} and {}.",
            temperature.0, temperature.1, humidity.0, humidity.1
        )
    }
}
