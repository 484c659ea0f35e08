//! Data Validation
//!
//! Range checking for the raw temperature and humidity readings accepted by
//! the fault check.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
