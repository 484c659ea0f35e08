//! Feature Vector Assembly

use serde::{Deserialize, Serialize};

/// Ordered feature values handed to a scaler and regressor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Create an empty vector with room for `capacity` features
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append a single feature
    pub fn push(&mut self, value: f64) -> &mut Self {
        self.values.push(value);
        self
    }

    /// Append a block of features, keeping their order
    pub fn extend_from_slice(&mut self, values: &[f64]) -> &mut Self {
        self.values.extend_from_slice(values);
        self
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw values in assembly order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_keeps_order() {
        let mut features = FeatureVector::with_capacity(5);
        features
            .extend_from_slice(&[0.0, 1.0])
            .push(120.5)
            .push(33.0);

        assert_eq!(features.len(), 4);
        assert_eq!(features.as_slice(), &[0.0, 1.0, 120.5, 33.0]);
    }

    #[test]
    fn test_empty_vector() {
        let features = FeatureVector::default();
        assert!(features.is_empty());
        assert_eq!(features.into_inner(), Vec::<f64>::new());
    }
}
