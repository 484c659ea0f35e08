//! One-Hot Categorical Encoder

use crate::FeatureError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Indicator encoding over a fixed, ordered set of categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEncoder")]
pub struct OneHotEncoder {
    categories: Vec<String>,
}

#[derive(Deserialize)]
struct RawEncoder {
    categories: Vec<String>,
}

impl TryFrom<RawEncoder> for OneHotEncoder {
    type Error = FeatureError;

    fn try_from(raw: RawEncoder) -> Result<Self, Self::Error> {
        Self::new(raw.categories)
    }
}

impl OneHotEncoder {
    /// Create an encoder; categories must be non-empty and unique
    pub fn new(categories: Vec<String>) -> Result<Self, FeatureError> {
        if categories.is_empty() {
            return Err(FeatureError::InvalidParameters(
                "encoder has no categories".to_string(),
            ));
        }
        for (i, category) in categories.iter().enumerate() {
            if categories[..i].contains(category) {
                return Err(FeatureError::InvalidParameters(format!(
                    "duplicate category '{}'",
                    category
                )));
            }
        }
        Ok(Self { categories })
    }

    /// Known categories in encoding order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Width of the encoded vector
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Encode a category as an indicator vector
    pub fn transform(&self, category: &str) -> Result<Vec<f64>, FeatureError> {
        let index = self
            .categories
            .iter()
            .position(|c| c == category)
            .ok_or_else(|| FeatureError::UnknownCategory(category.to_string()))?;

        debug!("Encoded category '{}' at index {}", category, index);

        let mut encoded = vec![0.0; self.categories.len()];
        encoded[index] = 1.0;
        Ok(encoded)
    }
}
