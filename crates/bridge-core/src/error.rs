use thiserror::Error;

use crate::models::field::LabField;

/// Field-level rejection of a vitals value.
///
/// Raised at extraction, manual entry and confirmation time. Values are never
/// clamped into range; the caller gets the field and the reason instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field}: {value} is outside the physiological range [{min}, {max}]")]
    OutOfRange {
        field: LabField,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{0}: a value is required before risk can be assessed")]
    Missing(LabField),

    #[error("bp_diastolic: {diastolic} must be lower than systolic {systolic}")]
    PulsePressure { systolic: u16, diastolic: u16 },

    #[error("{field}: unrecognised value {value:?}")]
    Unparseable { field: LabField, value: String },

    #[error("symptoms: unknown symptom {0:?}")]
    UnknownSymptom(String),

    #[error("symptoms: \"none\" cannot be combined with other symptoms")]
    NoneWithSymptoms,
}

impl ValidationError {
    /// Wire name of the field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::Missing(field)
            | ValidationError::Unparseable { field, .. } => field.as_str(),
            ValidationError::PulsePressure { .. } => LabField::BpDiastolic.as_str(),
            ValidationError::UnknownSymptom(_) | ValidationError::NoneWithSymptoms => "symptoms",
        }
    }
}
