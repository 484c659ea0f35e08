//! Standard Scaler
//!
//! Applies the per-feature standardisation fitted at training time:
//! `z = (x - mean) / scale`.

use crate::{FeatureError, FeatureVector};
use serde::{Deserialize, Serialize};

/// Per-feature standardisation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScaler")]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Deserialize)]
struct RawScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<RawScaler> for StandardScaler {
    type Error = FeatureError;

    fn try_from(raw: RawScaler) -> Result<Self, Self::Error> {
        Self::new(raw.mean, raw.scale)
    }
}

impl StandardScaler {
    /// Create a scaler from fitted means and scales.
    ///
    /// Zero scales (constant training features) are replaced by 1 so that the
    /// transform leaves those features centred but unscaled.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, FeatureError> {
        if mean.len() != scale.len() {
            return Err(FeatureError::DimensionMismatch {
                expected: mean.len(),
                actual: scale.len(),
            });
        }
        if mean.is_empty() {
            return Err(FeatureError::InvalidParameters(
                "scaler has no features".to_string(),
            ));
        }
        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(FeatureError::InvalidParameters(
                "scaler parameters must be finite".to_string(),
            ));
        }

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(Self { mean, scale })
    }

    /// Number of features the scaler was fitted on
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Standardise a feature vector
    pub fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, FeatureError> {
        if features.len() != self.dimension() {
            return Err(FeatureError::DimensionMismatch {
                expected: self.dimension(),
                actual: features.len(),
            });
        }

        let scaled: Vec<f64> = features
            .as_slice()
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect();

        Ok(FeatureVector::from(scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 0.5]).unwrap();
        let out = scaler
            .transform(&FeatureVector::from(vec![14.0, -1.0]))
            .unwrap();
        assert_eq!(out.as_slice(), &[2.0, -2.0]);
    }

    #[test]
    fn test_zero_scale_is_treated_as_one() {
        let scaler = StandardScaler::new(vec![3.0], vec![0.0]).unwrap();
        let out = scaler.transform(&FeatureVector::from(vec![5.0])).unwrap();
        assert_eq!(out.as_slice(), &[2.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let err = scaler
            .transform(&FeatureVector::from(vec![1.0, 2.0, 3.0]))
            .unwrap_err();
        assert_eq!(
            err,
            FeatureError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_rejects_inconsistent_parameters() {
        assert!(StandardScaler::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(StandardScaler::new(vec![], vec![]).is_err());
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: StandardScaler =
            serde_json::from_str(r#"{"mean": [1.0, 2.0], "scale": [1.0, 4.0]}"#).unwrap();
        assert_eq!(ok.dimension(), 2);

        let bad = serde_json::from_str::<StandardScaler>(r#"{"mean": [1.0], "scale": []}"#);
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn prop_identity_scaler_is_noop(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..16)) {
            let n = values.len();
            let scaler = StandardScaler::new(vec![0.0; n], vec![1.0; n]).unwrap();
            let out = scaler.transform(&FeatureVector::from(values.clone())).unwrap();
            prop_assert_eq!(out.into_inner(), values);
        }
    }
}
