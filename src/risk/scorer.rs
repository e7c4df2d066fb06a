//! Risk Scorer
//!
//! Derives the blended deterioration score, discrete risk tier, and
//! urgency from the classifier's probability distribution.
//!
//! Risk tier and blended score are two deliberately different signals:
//! the tier can be "low" while the blended score still crosses an urgency
//! boundary. Both are surfaced, never reconciled.

use crate::error::PredictionError;
use crate::model::classifier::{ClassProbabilities, Classifier};
use crate::risk::features::FeatureVector;
use crate::risk::rules::{TierThresholds, MEDIUM_RISK_WEIGHT};
use crate::risk::types::{Priority, RiskAssessment, RiskLevel, Urgency};

// ============================================================================
// SCORING
// ============================================================================

/// Assessment plus the raw distribution it was derived from
#[derive(Debug, Clone, Copy)]
pub struct ScoredRisk {
    pub assessment: RiskAssessment,
    pub probabilities: ClassProbabilities,
}

/// Invoke the classifier on `vector` and derive the risk assessment.
///
/// # Errors
/// Returns `Classifier` when the call fails or the distribution is
/// malformed. The whole prediction fails; no partial or defaulted tier
/// is ever produced.
pub fn score(
    vector: &FeatureVector,
    classifier: &dyn Classifier,
) -> Result<ScoredRisk, PredictionError> {
    let probabilities = classifier.predict(vector)?;
    probabilities.validate()?;

    Ok(ScoredRisk {
        assessment: assess(&probabilities, &TierThresholds::default()),
        probabilities,
    })
}

/// Derive the assessment from a validated distribution.
///
/// Deterministic and side-effect free.
pub fn assess(probs: &ClassProbabilities, thresholds: &TierThresholds) -> RiskAssessment {
    // Blended score: double-counts medium-risk mass at half weight.
    // NOT P_high alone and NOT 1 - P_low.
    let deterioration_probability = probs.high + MEDIUM_RISK_WEIGHT * probs.medium;

    let risk_level = argmax_level(probs);
    let confidence = probs.max();

    // Logical OR between blended score and discrete tier, top-down,
    // first match wins. Both lower bounds are inclusive.
    let (urgency, priority) = if deterioration_probability >= thresholds.immediate_min
        || risk_level == RiskLevel::High
    {
        (Urgency::Immediate, Priority::High)
    } else if deterioration_probability >= thresholds.elevated_min
        || risk_level == RiskLevel::Medium
    {
        (Urgency::WithinTwoWeeks, Priority::Medium)
    } else {
        (Urgency::RoutineMonitoring, Priority::Low)
    };

    RiskAssessment {
        deterioration_probability,
        risk_level,
        priority,
        urgency,
        confidence,
    }
}

/// First-maximum-wins argmax in classifier-native index order:
/// high (0), then low (1), then medium (2). The tie-break order is part
/// of the model contract, so it is spelled out here rather than left to
/// whatever a max-finding routine happens to do.
fn argmax_level(probs: &ClassProbabilities) -> RiskLevel {
    let mut best = RiskLevel::High;
    let mut best_p = probs.high;

    if probs.low > best_p {
        best = RiskLevel::Low;
        best_p = probs.low;
    }
    if probs.medium > best_p {
        best = RiskLevel::Medium;
    }

    best
}

// ============================================================================
// TESTS
// ============================================================================
