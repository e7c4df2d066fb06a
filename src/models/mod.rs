//! Request/response models

pub mod patient;
pub mod prediction;

pub use patient::PatientData;
pub use prediction::{ClassProbabilitiesPayload, ModelInfo, RiskPrediction};
