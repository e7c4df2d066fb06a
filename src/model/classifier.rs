//! Classifier Interface
//!
//! Narrow interface over the trained 3-class model. The decision layer
//! only ever sees a probability distribution; how it is produced (ONNX,
//! a different runtime, a test double) is behind the trait.

use serde::{Deserialize, Serialize};

use crate::error::PredictionError;
use crate::risk::features::FeatureVector;

/// Tolerated drift from 1.0 for the probability sum
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-3;

// ============================================================================
// CLASS PROBABILITIES
// ============================================================================

/// Probability distribution over the three fixed classes.
///
/// The field order mirrors the classifier-native class order
/// (high = index 0, low = index 1, medium = index 2). This ordering is an
/// external contract of the trained model; never resort by probability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub high: f64,
    pub low: f64,
    pub medium: f64,
}

impl ClassProbabilities {
    pub fn new(high: f64, low: f64, medium: f64) -> Self {
        Self { high, low, medium }
    }

    /// Reject malformed distributions. There is no safe fallback tier for
    /// a health-risk output, so anything off-shape fails the prediction.
    ///
    /// # Errors
    /// Returns `Classifier` when any entry is non-finite or outside [0, 1],
    /// or the sum is not 1 within tolerance.
    pub fn validate(&self) -> Result<(), PredictionError> {
        for (name, p) in [("high", self.high), ("low", self.low), ("medium", self.medium)] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(PredictionError::Classifier(format!(
                    "probability for class '{}' out of range: {}",
                    name, p
                )));
            }
        }

        let sum = self.high + self.low + self.medium;
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(PredictionError::Classifier(format!(
                "class probabilities sum to {:.6}, expected 1.0",
                sum
            )));
        }

        Ok(())
    }

    /// Maximum class probability
    pub fn max(&self) -> f64 {
        self.high.max(self.low).max(self.medium)
    }
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Black-box 3-class classifier
pub trait Classifier: Send + Sync {
    /// Map a feature vector to the (high, low, medium) distribution.
    ///
    /// # Errors
    /// Returns `Classifier` when the call fails or the output shape is
    /// not a 3-class distribution.
    fn predict(&self, vector: &FeatureVector) -> Result<ClassProbabilities, PredictionError>;
}

// ============================================================================
// TESTS
// ============================================================================
