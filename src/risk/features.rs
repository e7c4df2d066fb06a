//! Feature Assembly
//!
//! Turns a partially-specified patient record into the complete,
//! correctly-ordered numeric vector the classifier expects.
//!
//! The schema's ordered feature list is the positional contract of the
//! trained model and must never be permuted across a prediction call.

use std::collections::HashMap;

use crate::error::PredictionError;
use crate::risk::types::PatientRecord;

// ============================================================================
// FEATURE SCHEMA
// ============================================================================

/// Ordered canonical feature list plus per-feature defaults, fixed at
/// classifier-load time.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    feature_names: Vec<String>,
    defaults: HashMap<String, f64>,
}

impl FeatureSchema {
    /// Build a schema from an ordered name list and a default-value table.
    ///
    /// # Errors
    /// Returns `SchemaMismatch` when the feature list is empty - no
    /// meaningful vector can be assembled without a positional contract.
    pub fn new(
        feature_names: Vec<String>,
        defaults: HashMap<String, f64>,
    ) -> Result<Self, PredictionError> {
        if feature_names.is_empty() {
            return Err(PredictionError::SchemaMismatch);
        }
        Ok(Self {
            feature_names,
            defaults,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn len(&self) -> usize {
        self.feature_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature_names.is_empty()
    }

    /// Default substituted when a feature is absent from the record:
    /// the registered default if one exists, else 0.
    pub fn default_for(&self, name: &str) -> f64 {
        self.defaults.get(name).copied().unwrap_or(0.0)
    }

    /// Built-in default table carried over from model training.
    /// Metadata-provided defaults overlay these at load time.
    pub fn builtin_defaults() -> HashMap<String, f64> {
        HashMap::from([
            ("age".to_string(), 50.0),
            ("gender_male".to_string(), 0.0),
            ("bmi".to_string(), 25.0),
            ("systolic_bp".to_string(), 120.0),
            ("diastolic_bp".to_string(), 80.0),
            ("heart_rate".to_string(), 70.0),
            ("glucose".to_string(), 100.0),
            ("hba1c".to_string(), 6.0),
            ("cholesterol".to_string(), 200.0),
        ])
    }
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Fixed-length ordered numeric input to the classifier, one slot per
/// canonical feature in schema order. Every entry is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// ASSEMBLY
// ============================================================================

/// Assemble the feature vector for `record` against `schema`.
///
/// For each schema feature in order: take the record's value when present,
/// otherwise the schema default (or 0 if none is registered). Missing
/// fields are normal inputs, never errors; extra record keys are ignored.
/// Pure function of its two inputs.
///
/// # Errors
/// Returns `MalformedField` when a present field cannot be coerced to a
/// number.
pub fn assemble(
    record: &PatientRecord,
    schema: &FeatureSchema,
) -> Result<FeatureVector, PredictionError> {
    let mut values = Vec::with_capacity(schema.len());

    for name in schema.feature_names() {
        let value = match record.numeric(name)? {
            Some(v) => v,
            None => schema.default_for(name),
        };
        values.push(value);
    }

    Ok(FeatureVector { values })
}

// ============================================================================
// TESTS
// ============================================================================
