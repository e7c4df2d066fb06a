//! Recommendation Engine
//!
//! Ordered, rule-based generation of clinical recommendations.
//!
//! The tier block fires exactly one branch; the feature rules then run
//! independently in `FEATURE_RULES` order regardless of tier. Rules read
//! the RAW patient record (not the assembled vector) and apply their own
//! defaults from `rules`, which are separate from the assembler's schema
//! defaults. The output sequence is the concatenation in rule order.

use crate::error::PredictionError;
use crate::risk::rules::{
    RuleId, BMI_DEFAULT, BMI_OBESITY_MAX, COMORBIDITY_COORDINATION_MIN, COMORBIDITY_DEFAULT,
    ELEVATED_RISK_THRESHOLD, FEATURE_RULES, HBA1C_CONTROL_MAX, HBA1C_DEFAULT,
    IMMEDIATE_RISK_THRESHOLD, SYSTOLIC_BP_DEFAULT, SYSTOLIC_BP_TARGET_MAX,
};
use crate::risk::types::{
    PatientRecord, Priority, Recommendation, RecommendationCategory, RiskLevel,
};

// ============================================================================
// RULE ENGINE
// ============================================================================

/// Generate the ordered recommendation list for one prediction.
///
/// # Errors
/// Returns `MalformedField` when a consulted record field cannot be
/// coerced to a number.
pub fn recommend(
    record: &PatientRecord,
    deterioration_probability: f64,
    risk_level: RiskLevel,
) -> Result<Vec<Recommendation>, PredictionError> {
    let mut recommendations = Vec::new();

    tier_block(&mut recommendations, deterioration_probability, risk_level);

    for rule in FEATURE_RULES {
        apply_feature_rule(*rule, record, &mut recommendations)?;
    }

    Ok(recommendations)
}

/// Tier-based recommendations. Exactly one branch fires; the OR between
/// the discrete tier and the blended score matches the urgency table.
fn tier_block(out: &mut Vec<Recommendation>, risk_prob: f64, risk_level: RiskLevel) {
    if risk_level == RiskLevel::High || risk_prob >= IMMEDIATE_RISK_THRESHOLD {
        out.push(Recommendation::new(
            RecommendationCategory::ImmediateAction,
            "Schedule immediate clinical review within 24 hours",
            Priority::Critical,
            "High risk of deterioration detected",
        ));
        out.push(Recommendation::new(
            RecommendationCategory::CareCoordination,
            "Contact patient to assess current status",
            Priority::High,
            "Proactive monitoring required",
        ));
        out.push(Recommendation::new(
            RecommendationCategory::MedicationReview,
            "Review all medications for optimization",
            Priority::High,
            "Medication adjustment may reduce risk",
        ));
    } else if risk_level == RiskLevel::Medium || risk_prob >= ELEVATED_RISK_THRESHOLD {
        out.push(Recommendation::new(
            RecommendationCategory::FollowUp,
            "Schedule follow-up appointment within 2 weeks",
            Priority::Medium,
            "Moderate risk requires monitoring",
        ));
        out.push(Recommendation::new(
            RecommendationCategory::CarePlanReview,
            "Review care plan and medication adherence",
            Priority::Medium,
            "Optimization may prevent deterioration",
        ));
    } else {
        out.push(Recommendation::new(
            RecommendationCategory::RoutineCare,
            "Continue current care plan with routine monitoring",
            Priority::Low,
            "Low risk allows standard care approach",
        ));
    }
}

/// One independent feature-triggered rule: predicate over the raw record,
/// zero or one appended recommendation.
fn apply_feature_rule(
    rule: RuleId,
    record: &PatientRecord,
    out: &mut Vec<Recommendation>,
) -> Result<(), PredictionError> {
    match rule {
        RuleId::Bmi => {
            let bmi = record.numeric_or("bmi", BMI_DEFAULT)?;
            if bmi > BMI_OBESITY_MAX {
                out.push(Recommendation::new(
                    RecommendationCategory::Lifestyle,
                    "Refer to weight management program",
                    Priority::Medium,
                    format!("BMI {:.1} indicates obesity risk", bmi),
                ));
            }
        }
        RuleId::SystolicBp => {
            let systolic_bp = record.numeric_or("systolic_bp", SYSTOLIC_BP_DEFAULT)?;
            if systolic_bp > SYSTOLIC_BP_TARGET_MAX {
                out.push(Recommendation::new(
                    RecommendationCategory::BloodPressure,
                    "Optimize blood pressure management",
                    Priority::High,
                    format!("Systolic BP {:.0} above target", systolic_bp),
                ));
            }
        }
        RuleId::Hba1c => {
            let hba1c = record.numeric_or("hba1c", HBA1C_DEFAULT)?;
            if hba1c > HBA1C_CONTROL_MAX {
                out.push(Recommendation::new(
                    RecommendationCategory::DiabetesManagement,
                    "Intensify diabetes management",
                    Priority::High,
                    format!("HbA1c {:.1}% indicates poor glucose control", hba1c),
                ));
            }
        }
        RuleId::DiabetesFlag => {
            // Additive to the HbA1c rule above, never suppressed by it
            let has_diabetes = record.numeric_or("has_diabetes", 0.0)?;
            if has_diabetes == 1.0 {
                out.push(Recommendation::new(
                    RecommendationCategory::DiabetesMonitoring,
                    "Monitor glucose levels closely",
                    Priority::Medium,
                    "Diabetes requires ongoing management",
                ));
            }
        }
        RuleId::ComorbidityBurden => {
            let comorbidity_count = record.numeric_or("comorbidity_count", COMORBIDITY_DEFAULT)?;
            if comorbidity_count >= COMORBIDITY_COORDINATION_MIN {
                out.push(Recommendation::new(
                    RecommendationCategory::CareCoordination,
                    "Coordinate multi-specialty care",
                    Priority::High,
                    format!("{:.0} comorbidities require coordination", comorbidity_count),
                ));
            }
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, f64)]) -> PatientRecord {
        let mut record = PatientRecord::new();
        for (name, value) in fields {
            record.insert(*name, *value);
        }
        record
    }

    #[test]
    fn test_high_tier_block() {
        let recs = recommend(&PatientRecord::new(), 0.85, RiskLevel::High).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].category, RecommendationCategory::ImmediateAction);
        assert_eq!(recs[0].priority, Priority::Critical);
        assert_eq!(recs[1].category, RecommendationCategory::CareCoordination);
        assert_eq!(recs[2].category, RecommendationCategory::MedicationReview);
    }

    #[test]
    fn test_low_tier_block() {
        let recs = recommend(&PatientRecord::new(), 0.1, RiskLevel::Low).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, RecommendationCategory::RoutineCare);
        assert_eq!(recs[0].priority, Priority::Low);
    }

    #[test]
    fn test_tier_or_blended_score() {
        // Tier is low but the score crosses the immediate boundary:
        // the high branch fires.
        let recs = recommend(&PatientRecord::new(), 0.7, RiskLevel::Low).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].category, RecommendationCategory::ImmediateAction);
    }

    #[test]
    fn test_medium_scenario_exact_count() {
        // Scenario from the upstream model validation: systolic 140 is
        // NOT above target, so the BP rule stays quiet; diabetes flag
        // fires; medium tier contributes two.
        let record = record(&[
            ("age", 65.0),
            ("bmi", 28.5),
            ("systolic_bp", 140.0),
            ("diastolic_bp", 90.0),
            ("hba1c", 7.2),
            ("has_diabetes", 1.0),
            ("comorbidity_count", 0.0),
        ]);

        let recs = recommend(&record, 0.4, RiskLevel::Medium).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].category, RecommendationCategory::FollowUp);
        assert_eq!(recs[1].category, RecommendationCategory::CarePlanReview);
        assert_eq!(recs[2].category, RecommendationCategory::DiabetesMonitoring);
    }

    #[test]
    fn test_bmi_rule_fires_with_rationale() {
        let record = record(&[("bmi", 32.4)]);
        let recs = recommend(&record, 0.1, RiskLevel::Low).unwrap();

        let lifestyle: Vec<_> = recs
            .iter()
            .filter(|r| r.category == RecommendationCategory::Lifestyle)
            .collect();
        assert_eq!(lifestyle.len(), 1);
        assert_eq!(lifestyle[0].rationale, "BMI 32.4 indicates obesity risk");
    }

    #[test]
    fn test_bmi_rule_default_silences_missing_field() {
        // Record omits bmi entirely: the engine substitutes 25, which is
        // below the obesity threshold, independent of whatever default
        // the assembler applied.
        let recs = recommend(&PatientRecord::new(), 0.1, RiskLevel::Low).unwrap();
        assert!(recs
            .iter()
            .all(|r| r.category != RecommendationCategory::Lifestyle));
    }

    #[test]
    fn test_systolic_rule_strictly_above_target() {
        let at_target = record(&[("systolic_bp", 140.0)]);
        let recs = recommend(&at_target, 0.1, RiskLevel::Low).unwrap();
        assert!(recs
            .iter()
            .all(|r| r.category != RecommendationCategory::BloodPressure));

        let above_target = record(&[("systolic_bp", 141.0)]);
        let recs = recommend(&above_target, 0.1, RiskLevel::Low).unwrap();
        let bp: Vec<_> = recs
            .iter()
            .filter(|r| r.category == RecommendationCategory::BloodPressure)
            .collect();
        assert_eq!(bp.len(), 1);
        assert_eq!(bp[0].rationale, "Systolic BP 141 above target");
    }

    #[test]
    fn test_hba1c_and_diabetes_rules_are_additive() {
        let record = record(&[("hba1c", 9.1), ("has_diabetes", 1.0)]);
        let recs = recommend(&record, 0.1, RiskLevel::Low).unwrap();

        assert!(recs
            .iter()
            .any(|r| r.category == RecommendationCategory::DiabetesManagement));
        assert!(recs
            .iter()
            .any(|r| r.category == RecommendationCategory::DiabetesMonitoring));
    }

    #[test]
    fn test_comorbidity_rule_inclusive_bound() {
        let record = record(&[("comorbidity_count", 3.0)]);
        let recs = recommend(&record, 0.1, RiskLevel::Low).unwrap();

        let coordination: Vec<_> = recs
            .iter()
            .filter(|r| r.category == RecommendationCategory::CareCoordination)
            .collect();
        assert_eq!(coordination.len(), 1);
        assert_eq!(coordination[0].rationale, "3 comorbidities require coordination");
    }

    #[test]
    fn test_rule_order_is_stable() {
        // Every feature rule fires; output must follow rule order, not be
        // re-sorted by priority.
        let record = record(&[
            ("bmi", 35.0),
            ("systolic_bp", 160.0),
            ("hba1c", 9.5),
            ("has_diabetes", 1.0),
            ("comorbidity_count", 4.0),
        ]);

        let recs = recommend(&record, 0.9, RiskLevel::High).unwrap();
        let categories: Vec<_> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                RecommendationCategory::ImmediateAction,
                RecommendationCategory::CareCoordination,
                RecommendationCategory::MedicationReview,
                RecommendationCategory::Lifestyle,
                RecommendationCategory::BloodPressure,
                RecommendationCategory::DiabetesManagement,
                RecommendationCategory::DiabetesMonitoring,
                RecommendationCategory::CareCoordination,
            ]
        );
    }

    #[test]
    fn test_malformed_consulted_field_fails() {
        let mut record = PatientRecord::new();
        record.insert("hba1c", "high");

        let err = recommend(&record, 0.1, RiskLevel::Low).unwrap_err();
        assert!(matches!(err, PredictionError::MalformedField { .. }));
    }
}
