//! Model Store
//!
//! Holds the two predictor bundles for the process lifetime. Each slot is
//! resolved once at startup; a failed load is logged and leaves the slot
//! permanently unavailable.

use crate::bundle::{PredictorBundle, SpeedBundle, TaskBundle};
use crate::InferenceError;
use std::path::Path;
use tracing::warn;

/// A bundle that either loaded completely or is unavailable
#[derive(Debug)]
pub enum ModelSlot<B> {
    Loaded(B),
    Unavailable { reason: String },
}

impl<B: PredictorBundle> ModelSlot<B> {
    /// Load a bundle, turning any failure into an unavailable slot
    pub fn load(path: &Path) -> Self {
        Self::from_result(B::load(path), path)
    }

    fn from_result(result: Result<B, InferenceError>, path: &Path) -> Self {
        match result {
            Ok(bundle) => ModelSlot::Loaded(bundle),
            Err(e) => {
                warn!(
                    "Failed to load {} model from {}: {}",
                    B::CAPABILITY,
                    path.display(),
                    e
                );
                ModelSlot::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl<B> ModelSlot<B> {
    pub fn loaded(&self) -> Option<&B> {
        match self {
            ModelSlot::Loaded(bundle) => Some(bundle),
            ModelSlot::Unavailable { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelSlot::Loaded(_))
    }

    /// Why the bundle failed to load, if it did
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            ModelSlot::Loaded(_) => None,
            ModelSlot::Unavailable { reason } => Some(reason),
        }
    }
}

impl<B> From<B> for ModelSlot<B> {
    fn from(bundle: B) -> Self {
        ModelSlot::Loaded(bundle)
    }
}

/// Process-wide, read-only set of predictor bundles
#[derive(Debug)]
pub struct ModelStore {
    task: ModelSlot<TaskBundle>,
    speed: ModelSlot<SpeedBundle>,
}

impl ModelStore {
    /// Build a store from already-resolved slots
    pub fn new(task: ModelSlot<TaskBundle>, speed: ModelSlot<SpeedBundle>) -> Self {
        Self { task, speed }
    }

    /// Load both bundles; never fails
    pub fn load(task_path: &Path, speed_path: &Path) -> Self {
        Self {
            task: ModelSlot::load(task_path),
            speed: ModelSlot::load(speed_path),
        }
    }

    pub fn task(&self) -> &ModelSlot<TaskBundle> {
        &self.task
    }

    pub fn speed(&self) -> &ModelSlot<SpeedBundle> {
        &self.speed
    }
}
