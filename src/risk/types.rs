//! Risk Types
//!
//! Core types for risk stratification. No logic here beyond
//! field coercion - scoring lives in `scorer`, rules in `engine`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PredictionError;

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Discrete risk tier assigned by maximum classifier probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Low probability of 90-day deterioration
    Low,
    /// Moderate probability, monitoring recommended
    Medium,
    /// High probability, intervention recommended
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PRIORITY & URGENCY
// ============================================================================

/// Priority of an assessment or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }
}

/// Caller-facing scheduling guidance derived from tier and score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    #[serde(rename = "ROUTINE MONITORING")]
    RoutineMonitoring,
    #[serde(rename = "WITHIN 2 WEEKS")]
    WithinTwoWeeks,
    #[serde(rename = "IMMEDIATE")]
    Immediate,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::RoutineMonitoring => "ROUTINE MONITORING",
            Urgency::WithinTwoWeeks => "WITHIN 2 WEEKS",
            Urgency::Immediate => "IMMEDIATE",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK ASSESSMENT
// ============================================================================

/// Derived assessment for one prediction call. Created fresh per request,
/// never persisted.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskAssessment {
    /// Blended 90-day deterioration probability: P_high + 0.5 * P_medium
    pub deterioration_probability: f64,
    /// Tier with the maximum class probability
    pub risk_level: RiskLevel,
    pub priority: Priority,
    pub urgency: Urgency,
    /// Maximum class probability
    pub confidence: f64,
}

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

/// Category of a clinical recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationCategory {
    ImmediateAction,
    CareCoordination,
    MedicationReview,
    FollowUp,
    CarePlanReview,
    RoutineCare,
    Lifestyle,
    BloodPressure,
    DiabetesManagement,
    DiabetesMonitoring,
}

/// A single clinical recommendation
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub recommendation: String,
    pub priority: Priority,
    pub rationale: String,
}

impl Recommendation {
    pub fn new(
        category: RecommendationCategory,
        recommendation: impl Into<String>,
        priority: Priority,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            category,
            recommendation: recommendation.into(),
            priority,
            rationale: rationale.into(),
        }
    }
}

// ============================================================================
// PATIENT RECORD
// ============================================================================

/// Partially-specified patient record: feature name -> raw value.
///
/// Any subset of the canonical feature set may be absent - input data
/// windows run 30-180 days and field coverage varies by site. Immutable
/// once it enters the prediction pipeline.
#[derive(Debug, Clone, Default)]
pub struct PatientRecord {
    fields: BTreeMap<String, Value>,
}

impl PatientRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read a field as a number. Booleans coerce to 0/1. Absent fields
    /// return `Ok(None)` - missing is a normal condition, not an error.
    pub fn numeric(&self, name: &str) -> Result<Option<f64>, PredictionError> {
        match self.fields.get(name) {
            None => Ok(None),
            Some(Value::Number(n)) => {
                n.as_f64().map(Some).ok_or_else(|| PredictionError::MalformedField {
                    name: name.to_string(),
                    value: n.to_string(),
                })
            }
            Some(Value::Bool(b)) => Ok(Some(if *b { 1.0 } else { 0.0 })),
            Some(other) => Err(PredictionError::MalformedField {
                name: name.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Read a field as a number, substituting `default` when absent.
    pub fn numeric_or(&self, name: &str, default: f64) -> Result<f64, PredictionError> {
        Ok(self.numeric(name)?.unwrap_or(default))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_risk_level_serialization() {
        assert_eq!(serde_json::to_value(RiskLevel::High).unwrap(), json!("high"));
        assert_eq!(serde_json::to_value(RiskLevel::Medium).unwrap(), json!("medium"));
        assert_eq!(serde_json::to_value(RiskLevel::Low).unwrap(), json!("low"));
    }

    #[test]
    fn test_urgency_serialization() {
        assert_eq!(
            serde_json::to_value(Urgency::WithinTwoWeeks).unwrap(),
            json!("WITHIN 2 WEEKS")
        );
        assert_eq!(
            serde_json::to_value(Urgency::RoutineMonitoring).unwrap(),
            json!("ROUTINE MONITORING")
        );
        assert_eq!(serde_json::to_value(Urgency::Immediate).unwrap(), json!("IMMEDIATE"));
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_value(RecommendationCategory::ImmediateAction).unwrap(),
            json!("IMMEDIATE_ACTION")
        );
        assert_eq!(
            serde_json::to_value(RecommendationCategory::CarePlanReview).unwrap(),
            json!("CARE_PLAN_REVIEW")
        );
    }

    #[test]
    fn test_record_numeric_coercion() {
        let mut record = PatientRecord::new();
        record.insert("age", 65);
        record.insert("bmi", 28.5);
        record.insert("has_diabetes", true);

        assert_eq!(record.numeric("age").unwrap(), Some(65.0));
        assert_eq!(record.numeric("bmi").unwrap(), Some(28.5));
        assert_eq!(record.numeric("has_diabetes").unwrap(), Some(1.0));
        assert_eq!(record.numeric("hba1c").unwrap(), None);
    }

    #[test]
    fn test_record_numeric_or_default() {
        let record = PatientRecord::new();
        assert_eq!(record.numeric_or("bmi", 25.0).unwrap(), 25.0);
    }

    #[test]
    fn test_record_malformed_field() {
        let mut record = PatientRecord::new();
        record.insert("bmi", "not a number");

        let err = record.numeric("bmi").unwrap_err();
        assert!(matches!(err, PredictionError::MalformedField { .. }));
    }
}
