use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::bounds;
use crate::error::ValidationError;
use crate::models::field::{ExtractedField, LabField};
use crate::models::proteinuria::Proteinuria;
use crate::models::symptom::{Symptom, SymptomSet};

/// Vitals that may still have gaps: manual entry, operator confirmation
/// input, or the values recovered from a lab report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PartialVitals {
    pub bp_systolic: Option<u16>,
    pub bp_diastolic: Option<u16>,
    pub hemoglobin: Option<f64>,
    pub platelets: Option<u32>,
    pub gestational_age_weeks: Option<u8>,
    pub proteinuria: Option<Proteinuria>,
    pub weight_kg: Option<f64>,
}

impl PartialVitals {
    /// Collect whatever values an extraction batch produced.
    pub fn from_fields(fields: &[ExtractedField]) -> Self {
        let mut out = Self::default();
        for f in fields {
            let Some(v) = f.value else { continue };
            match f.field {
                LabField::Hemoglobin => out.hemoglobin = Some(v),
                LabField::Platelets => out.platelets = Some(v.round() as u32),
                LabField::BpSystolic => out.bp_systolic = Some(v.round() as u16),
                LabField::BpDiastolic => out.bp_diastolic = Some(v.round() as u16),
                LabField::GestationalAge => out.gestational_age_weeks = Some(v.round() as u8),
                LabField::Proteinuria => out.proteinuria = Proteinuria::from_grade_value(v),
                LabField::Weight => out.weight_kg = Some(v),
            }
        }
        out
    }

    /// Field-by-field overlay: any value present in `over` replaces ours,
    /// an absent value keeps ours.
    pub fn overlay(&self, over: &PartialVitals) -> PartialVitals {
        PartialVitals {
            bp_systolic: over.bp_systolic.or(self.bp_systolic),
            bp_diastolic: over.bp_diastolic.or(self.bp_diastolic),
            hemoglobin: over.hemoglobin.or(self.hemoglobin),
            platelets: over.platelets.or(self.platelets),
            gestational_age_weeks: over.gestational_age_weeks.or(self.gestational_age_weeks),
            proteinuria: over.proteinuria.or(self.proteinuria),
            weight_kg: over.weight_kg.or(self.weight_kg),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == PartialVitals::default()
    }

    /// Present values as `(field, numeric value)` pairs.
    pub fn present(&self) -> Vec<(LabField, f64)> {
        let pairs = [
            (LabField::Hemoglobin, self.hemoglobin),
            (LabField::Platelets, self.platelets.map(f64::from)),
            (LabField::BpSystolic, self.bp_systolic.map(f64::from)),
            (LabField::BpDiastolic, self.bp_diastolic.map(f64::from)),
            (LabField::GestationalAge, self.gestational_age_weeks.map(f64::from)),
            (LabField::Proteinuria, self.proteinuria.map(|p| f64::from(p.grade()))),
            (LabField::Weight, self.weight_kg),
        ];
        pairs
            .into_iter()
            .filter_map(|(field, v)| v.map(|v| (field, v)))
            .collect()
    }

    /// Check every present value against its physiological bound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.present() {
            bounds::check(field, value)?;
        }
        if let (Some(systolic), Some(diastolic)) = (self.bp_systolic, self.bp_diastolic)
            && diastolic >= systolic
        {
            return Err(ValidationError::PulsePressure {
                systolic,
                diastolic,
            });
        }
        Ok(())
    }

    /// Build a snapshot eligible for rule evaluation.
    ///
    /// Blood pressure, hemoglobin, platelets and gestational age are
    /// required. A missing proteinuria reading is taken as nil.
    pub fn complete(&self, symptoms: SymptomSet) -> Result<VitalsSnapshot, ValidationError> {
        self.validate()?;
        let bp_systolic = self.bp_systolic.ok_or(ValidationError::Missing(LabField::BpSystolic))?;
        let bp_diastolic = self
            .bp_diastolic
            .ok_or(ValidationError::Missing(LabField::BpDiastolic))?;
        let hemoglobin = self.hemoglobin.ok_or(ValidationError::Missing(LabField::Hemoglobin))?;
        let platelets = self.platelets.ok_or(ValidationError::Missing(LabField::Platelets))?;
        let gestational_age_weeks = self
            .gestational_age_weeks
            .ok_or(ValidationError::Missing(LabField::GestationalAge))?;

        Ok(VitalsSnapshot {
            bp_systolic,
            bp_diastolic,
            hemoglobin,
            platelets,
            gestational_age_weeks,
            proteinuria: self.proteinuria.unwrap_or_default(),
            weight_kg: self.weight_kg,
            symptoms,
        })
    }
}

/// Complete, bounds-checked input to the rule engine. Only obtainable through
/// [`PartialVitals::complete`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalsSnapshot {
    bp_systolic: u16,
    bp_diastolic: u16,
    hemoglobin: f64,
    platelets: u32,
    gestational_age_weeks: u8,
    proteinuria: Proteinuria,
    weight_kg: Option<f64>,
    symptoms: SymptomSet,
}

impl VitalsSnapshot {
    pub fn bp_systolic(&self) -> u16 {
        self.bp_systolic
    }

    pub fn bp_diastolic(&self) -> u16 {
        self.bp_diastolic
    }

    pub fn hemoglobin(&self) -> f64 {
        self.hemoglobin
    }

    pub fn platelets(&self) -> u32 {
        self.platelets
    }

    pub fn gestational_age_weeks(&self) -> u8 {
        self.gestational_age_weeks
    }

    pub fn proteinuria(&self) -> Proteinuria {
        self.proteinuria
    }

    pub fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    pub fn symptoms(&self) -> &SymptomSet {
        &self.symptoms
    }

    pub fn has_symptom(&self, symptom: Symptom) -> bool {
        self.symptoms.contains(symptom)
    }

    /// Back to the partial form, e.g. to vary one field in a test or a
    /// what-if calculation.
    pub fn to_partial(&self) -> PartialVitals {
        PartialVitals {
            bp_systolic: Some(self.bp_systolic),
            bp_diastolic: Some(self.bp_diastolic),
            hemoglobin: Some(self.hemoglobin),
            platelets: Some(self.platelets),
            gestational_age_weeks: Some(self.gestational_age_weeks),
            proteinuria: Some(self.proteinuria),
            weight_kg: self.weight_kg,
        }
    }
}
