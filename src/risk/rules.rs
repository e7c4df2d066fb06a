//! Risk Rules & Thresholds
//!
//! Thresholds and per-rule defaults for scoring and recommendations.
//! No scoring or rule logic here - only constants and config.
//!
//! The rule defaults below are intentionally independent from the
//! Feature Assembler's schema defaults. The two tables exist separately
//! upstream and unifying them would silently change observable output.

use serde::{Deserialize, Serialize};

// ============================================================================
// TIER THRESHOLDS
// ============================================================================

/// Deterioration probability at or above this = IMMEDIATE urgency
pub const IMMEDIATE_RISK_THRESHOLD: f64 = 0.7;

/// Deterioration probability at or above this = WITHIN 2 WEEKS urgency
pub const ELEVATED_RISK_THRESHOLD: f64 = 0.3;

/// Weight applied to the medium-risk class mass in the blended score
pub const MEDIUM_RISK_WEIGHT: f64 = 0.5;

// ============================================================================
// FEATURE RULE THRESHOLDS & DEFAULTS
// ============================================================================

/// BMI assumed when the record omits `bmi`
pub const BMI_DEFAULT: f64 = 25.0;

/// BMI strictly above this triggers the weight-management referral
pub const BMI_OBESITY_MAX: f64 = 30.0;

/// Systolic BP assumed when the record omits `systolic_bp`
pub const SYSTOLIC_BP_DEFAULT: f64 = 120.0;

/// Systolic BP strictly above this triggers blood-pressure optimization
pub const SYSTOLIC_BP_TARGET_MAX: f64 = 140.0;

/// HbA1c assumed when the record omits `hba1c`
pub const HBA1C_DEFAULT: f64 = 6.0;

/// HbA1c strictly above this triggers intensified diabetes management
pub const HBA1C_CONTROL_MAX: f64 = 8.0;

/// Comorbidity count assumed when the record omits `comorbidity_count`
pub const COMORBIDITY_DEFAULT: f64 = 0.0;

/// Comorbidity count at or above this triggers multi-specialty coordination
pub const COMORBIDITY_COORDINATION_MIN: f64 = 3.0;

// ============================================================================
// RULE ORDER
// ============================================================================

/// Feature-triggered rule identifiers
///
/// Each rule is an independent predicate -> append step. Rules never
/// consult each other's output and there is no cross-rule suppression:
/// the diabetes-flag rule fires in addition to the HbA1c rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleId {
    Bmi,
    SystolicBp,
    Hba1c,
    DiabetesFlag,
    ComorbidityBurden,
}

/// Evaluation order of the feature-triggered rules. Output order of the
/// recommendation list follows this exactly; it is never re-sorted.
pub const FEATURE_RULES: &[RuleId] = &[
    RuleId::Bmi,
    RuleId::SystolicBp,
    RuleId::Hba1c,
    RuleId::DiabetesFlag,
    RuleId::ComorbidityBurden,
];

// ============================================================================
// CONFIGURABLE TIER THRESHOLDS
// ============================================================================

/// Tier thresholds for urgency derivation (configurable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierThresholds {
    /// At or above this blended score = IMMEDIATE
    pub immediate_min: f64,
    /// At or above this blended score = WITHIN 2 WEEKS
    pub elevated_min: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            immediate_min: IMMEDIATE_RISK_THRESHOLD,
            elevated_min: ELEVATED_RISK_THRESHOLD,
        }
    }
}
