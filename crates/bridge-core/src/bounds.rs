//! Hard physiological bounds.
//!
//! A reading outside these ranges is a misread or a typo, never a patient.
//! Extraction discards such values and manual/confirmed entry rejects them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::models::field::LabField;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PhysiologicalRange {
    pub min: f64,
    pub max: f64,
}

impl PhysiologicalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

pub const HEMOGLOBIN_G_DL: PhysiologicalRange = PhysiologicalRange::new(3.0, 22.0);
pub const PLATELETS_PER_UL: PhysiologicalRange = PhysiologicalRange::new(5_000.0, 1_500_000.0);
pub const BP_SYSTOLIC_MMHG: PhysiologicalRange = PhysiologicalRange::new(70.0, 250.0);
pub const BP_DIASTOLIC_MMHG: PhysiologicalRange = PhysiologicalRange::new(40.0, 150.0);
pub const GESTATIONAL_AGE_WEEKS: PhysiologicalRange = PhysiologicalRange::new(4.0, 42.0);
pub const PROTEINURIA_GRADE: PhysiologicalRange = PhysiologicalRange::new(0.0, 3.0);
pub const WEIGHT_KG: PhysiologicalRange = PhysiologicalRange::new(30.0, 150.0);

/// Bound for a tracked field.
pub fn range_for(field: LabField) -> PhysiologicalRange {
    match field {
        LabField::Hemoglobin => HEMOGLOBIN_G_DL,
        LabField::Platelets => PLATELETS_PER_UL,
        LabField::BpSystolic => BP_SYSTOLIC_MMHG,
        LabField::BpDiastolic => BP_DIASTOLIC_MMHG,
        LabField::GestationalAge => GESTATIONAL_AGE_WEEKS,
        LabField::Proteinuria => PROTEINURIA_GRADE,
        LabField::Weight => WEIGHT_KG,
    }
}

/// Check a value against its field's bound, returning it unchanged when valid.
pub fn check(field: LabField, value: f64) -> Result<f64, ValidationError> {
    let range = range_for(field);
    if range.contains(value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min: range.min,
            max: range.max,
        })
    }
}
