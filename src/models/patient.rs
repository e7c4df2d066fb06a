//! Patient request model
//!
//! Typed payload for risk prediction over 30-180 days of patient data.
//! Everything beyond age, BMI, and blood pressure is optional; absent
//! fields take the documented defaults. Unknown extra fields flatten
//! into `extra` and are carried into the raw record, since the canonical
//! feature schema may name features this typed surface does not.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::risk::types::PatientRecord;

fn default_patient_id() -> String {
    "unknown".to_string()
}

fn default_heart_rate() -> f64 {
    70.0
}

fn default_glucose() -> f64 {
    100.0
}

fn default_hba1c() -> f64 {
    6.0
}

fn default_cholesterol() -> f64 {
    200.0
}

fn default_flag_set() -> u8 {
    1
}

/// Patient data for risk prediction
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PatientData {
    /// Unique patient identifier
    #[serde(default = "default_patient_id")]
    pub patient_id: String,

    // Demographics
    /// Patient age in years
    #[validate(range(max = 120))]
    pub age: u32,
    /// 1 if male, 0 if female
    #[serde(default)]
    #[validate(range(max = 1))]
    pub gender_male: u8,

    // Race/Ethnicity
    #[serde(default)]
    #[validate(range(max = 1))]
    pub race_white: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub race_black: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub race_asian: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub race_hispanic: u8,

    // Chronic Conditions
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_diabetes: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_hypertension: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_heart_disease: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_kidney_disease: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_stroke: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_copd: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_depression: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_cancer: u8,

    // Condition counts
    #[serde(default)]
    pub total_conditions: u32,
    #[serde(default)]
    pub comorbidity_count: u32,

    // Vital Signs & Lab Results
    /// Body Mass Index
    #[validate(range(exclusive_min = 10.0, exclusive_max = 70.0))]
    pub bmi: f64,
    /// Systolic blood pressure mmHg
    #[validate(range(exclusive_min = 60.0, exclusive_max = 250.0))]
    pub systolic_bp: f64,
    /// Diastolic blood pressure mmHg
    #[validate(range(exclusive_min = 40.0, exclusive_max = 150.0))]
    pub diastolic_bp: f64,
    /// Heart rate bpm
    #[serde(default = "default_heart_rate")]
    #[validate(range(exclusive_min = 30.0, exclusive_max = 200.0))]
    pub heart_rate: f64,
    /// Blood glucose mg/dL
    #[serde(default = "default_glucose")]
    #[validate(range(exclusive_min = 50.0, exclusive_max = 500.0))]
    pub glucose: f64,
    /// HbA1c percentage
    #[serde(default = "default_hba1c")]
    #[validate(range(exclusive_min = 4.0, exclusive_max = 15.0))]
    pub hba1c: f64,
    /// Total cholesterol mg/dL
    #[serde(default = "default_cholesterol")]
    #[validate(range(exclusive_min = 100.0, exclusive_max = 400.0))]
    pub cholesterol: f64,

    // Data availability flags
    #[serde(default = "default_flag_set")]
    #[validate(range(max = 1))]
    pub has_bmi_data: u8,
    #[serde(default = "default_flag_set")]
    #[validate(range(max = 1))]
    pub has_bp_data: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_glucose_data: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_hba1c_data: u8,

    // Healthcare Utilization (last 30-180 days)
    #[serde(default)]
    pub total_encounters: u32,
    #[serde(default)]
    pub inpatient_visits: u32,
    #[serde(default)]
    pub emergency_visits: u32,
    #[serde(default)]
    pub outpatient_visits: u32,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_inpatient: u8,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub has_emergency: u8,

    // Medications
    #[serde(default)]
    pub medication_count: u32,
    /// 1 if >5 medications
    #[serde(default)]
    #[validate(range(max = 1))]
    pub polypharmacy: u8,

    /// Extra features beyond the typed surface
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl PatientData {
    /// Flatten into the raw record the decision layer consumes.
    /// `patient_id` is response metadata, not a feature, and stays out.
    pub fn to_record(&self) -> PatientRecord {
        let mut record = PatientRecord::new();

        record.insert("age", self.age);
        record.insert("gender_male", self.gender_male);
        record.insert("race_white", self.race_white);
        record.insert("race_black", self.race_black);
        record.insert("race_asian", self.race_asian);
        record.insert("race_hispanic", self.race_hispanic);
        record.insert("has_diabetes", self.has_diabetes);
        record.insert("has_hypertension", self.has_hypertension);
        record.insert("has_heart_disease", self.has_heart_disease);
        record.insert("has_kidney_disease", self.has_kidney_disease);
        record.insert("has_stroke", self.has_stroke);
        record.insert("has_copd", self.has_copd);
        record.insert("has_depression", self.has_depression);
        record.insert("has_cancer", self.has_cancer);
        record.insert("total_conditions", self.total_conditions);
        record.insert("comorbidity_count", self.comorbidity_count);
        record.insert("bmi", self.bmi);
        record.insert("systolic_bp", self.systolic_bp);
        record.insert("diastolic_bp", self.diastolic_bp);
        record.insert("heart_rate", self.heart_rate);
        record.insert("glucose", self.glucose);
        record.insert("hba1c", self.hba1c);
        record.insert("cholesterol", self.cholesterol);
        record.insert("has_bmi_data", self.has_bmi_data);
        record.insert("has_bp_data", self.has_bp_data);
        record.insert("has_glucose_data", self.has_glucose_data);
        record.insert("has_hba1c_data", self.has_hba1c_data);
        record.insert("total_encounters", self.total_encounters);
        record.insert("inpatient_visits", self.inpatient_visits);
        record.insert("emergency_visits", self.emergency_visits);
        record.insert("outpatient_visits", self.outpatient_visits);
        record.insert("has_inpatient", self.has_inpatient);
        record.insert("has_emergency", self.has_emergency);
        record.insert("medication_count", self.medication_count);
        record.insert("polypharmacy", self.polypharmacy);

        for (name, value) in &self.extra {
            record.insert(name.clone(), value.clone());
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_payload() -> Value {
        json!({
            "age": 65,
            "bmi": 28.5,
            "systolic_bp": 140.0,
            "diastolic_bp": 90.0
        })
    }

    #[test]
    fn test_minimal_payload_gets_defaults() {
        let patient: PatientData = serde_json::from_value(minimal_payload()).unwrap();
        assert!(patient.validate().is_ok());

        assert_eq!(patient.patient_id, "unknown");
        assert_eq!(patient.heart_rate, 70.0);
        assert_eq!(patient.glucose, 100.0);
        assert_eq!(patient.hba1c, 6.0);
        assert_eq!(patient.cholesterol, 200.0);
        assert_eq!(patient.has_diabetes, 0);
        assert_eq!(patient.has_bmi_data, 1);
        assert_eq!(patient.comorbidity_count, 0);
    }

    #[test]
    fn test_extra_fields_flatten_into_record() {
        let mut payload = minimal_payload();
        payload["avg_daily_steps"] = json!(4200);
        payload["patient_id"] = json!("p-001");

        let patient: PatientData = serde_json::from_value(payload).unwrap();
        assert_eq!(patient.patient_id, "p-001");

        let record = patient.to_record();
        assert_eq!(record.numeric("avg_daily_steps").unwrap(), Some(4200.0));
        assert!(!record.contains("patient_id"));
    }

    #[test]
    fn test_record_contains_typed_fields() {
        let patient: PatientData = serde_json::from_value(json!({
            "age": 65,
            "bmi": 28.5,
            "systolic_bp": 140.0,
            "diastolic_bp": 90.0,
            "has_diabetes": 1,
            "hba1c": 7.2
        }))
        .unwrap();

        let record = patient.to_record();
        assert_eq!(record.numeric("age").unwrap(), Some(65.0));
        assert_eq!(record.numeric("has_diabetes").unwrap(), Some(1.0));
        assert_eq!(record.numeric("hba1c").unwrap(), Some(7.2));
        // pydantic-style defaults are materialized into the record
        assert_eq!(record.numeric("heart_rate").unwrap(), Some(70.0));
    }

    #[test]
    fn test_out_of_range_vitals_rejected() {
        let patient: PatientData = serde_json::from_value(json!({
            "age": 65,
            "bmi": 8.0,
            "systolic_bp": 140.0,
            "diastolic_bp": 90.0
        }))
        .unwrap();

        assert!(patient.validate().is_err());
    }
}
