//! Fault Decision Table

use crate::FaultRuleError;
use data_validator::{ValidationConfig, Validator};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw environmental reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaultInput {
    /// Temperature (0-80 °C)
    pub temperature: f64,
    /// Relative humidity (0-80 %RH)
    pub humidity: f64,
}

/// Fault classes, ordered by their wire code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultCode {
    NoFault,
    HighTemperature,
    HighHumidity,
    Critical,
}

impl FaultCode {
    /// Numeric code reported to clients
    pub fn code(&self) -> u8 {
        match self {
            FaultCode::NoFault => 0,
            FaultCode::HighTemperature => 1,
            FaultCode::HighHumidity => 2,
            FaultCode::Critical => 3,
        }
    }

    /// Human-readable status
    pub fn label(&self) -> &'static str {
        match self {
            FaultCode::NoFault => "No Fault",
            FaultCode::HighTemperature => "High Temperature Fault",
            FaultCode::HighHumidity => "High Humidity Fault",
            FaultCode::Critical => "Critical Fault: High Temperature and High Humidity",
        }
    }
}

/// Thresholds above which a reading counts as high
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaultThresholds {
    pub temperature: f64,
    pub humidity: f64,
}

impl Default for FaultThresholds {
    fn default() -> Self {
        Self {
            temperature: 60.0,
            humidity: 60.0,
        }
    }
}

impl FaultThresholds {
    /// First matching row of the decision table
    pub fn classify(&self, temperature: f64, humidity: f64) -> FaultCode {
        let hot = temperature > self.temperature;
        let humid = humidity > self.humidity;

        match (hot, humid) {
            (true, true) => FaultCode::Critical,
            (true, false) => FaultCode::HighTemperature,
            (false, true) => FaultCode::HighHumidity,
            (false, false) => FaultCode::NoFault,
        }
    }
}

/// Fault check response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultAssessment {
    pub temperature: f64,
    pub humidity: f64,
    pub fault_code: u8,
    pub fault_status: String,
    /// Always true: the result comes from thresholds, not a model
    pub rule_based: bool,
}

/// Validates readings and applies the fault thresholds
#[derive(Debug, Clone)]
pub struct FaultRuleEngine {
    validator: Validator,
    thresholds: FaultThresholds,
}

impl Default for FaultRuleEngine {
    fn default() -> Self {
        Self::new(ValidationConfig::default(), FaultThresholds::default())
    }
}

impl FaultRuleEngine {
    pub fn new(ranges: ValidationConfig, thresholds: FaultThresholds) -> Self {
        Self {
            validator: Validator::new(ranges),
            thresholds,
        }
    }

    /// Check the reading range, then classify it
    pub fn evaluate(&self, input: &FaultInput) -> Result<FaultAssessment, FaultRuleError> {
        let result = self
            .validator
            .validate_reading(input.temperature, input.humidity);
        if !result.valid {
            let ranges = self.validator.config();
            return Err(FaultRuleError::OutOfRange {
                temperature: ranges.temperature_range,
                humidity: ranges.humidity_range,
                violations: result.errors,
            });
        }

        let fault = self.thresholds.classify(input.temperature, input.humidity);
        debug!(
            "Fault check: temperature={} humidity={} -> {:?}",
            input.temperature, input.humidity, fault
        );

        Ok(FaultAssessment {
            temperature: input.temperature,
            humidity: input.humidity,
            fault_code: fault.code(),
            fault_status: fault.label().to_string(),
            rule_based: true,
        })
    }
}
