use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::proteinuria::Proteinuria;

/// A parameter tracked by extraction and confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LabField {
    Hemoglobin,
    Platelets,
    BpSystolic,
    BpDiastolic,
    GestationalAge,
    Proteinuria,
    Weight,
}

impl LabField {
    pub const ALL: [LabField; 7] = [
        LabField::Hemoglobin,
        LabField::Platelets,
        LabField::BpSystolic,
        LabField::BpDiastolic,
        LabField::GestationalAge,
        LabField::Proteinuria,
        LabField::Weight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabField::Hemoglobin => "hemoglobin",
            LabField::Platelets => "platelets",
            LabField::BpSystolic => "bp_systolic",
            LabField::BpDiastolic => "bp_diastolic",
            LabField::GestationalAge => "gestational_age",
            LabField::Proteinuria => "proteinuria",
            LabField::Weight => "weight",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            LabField::Hemoglobin => "g/dL",
            LabField::Platelets => "/µL",
            LabField::BpSystolic | LabField::BpDiastolic => "mmHg",
            LabField::GestationalAge => "weeks",
            LabField::Proteinuria => "grade",
            LabField::Weight => "kg",
        }
    }
}

impl fmt::Display for LabField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldStatus {
    /// Read from the OCR text as written.
    Extracted,
    /// Read from the OCR text and repaired (e.g. a dropped decimal point).
    Corrected,
    NotFound,
    /// Entered by the health worker rather than read from a report.
    Manual,
}

impl FieldStatus {
    /// Whether the value came from OCR and is therefore subject to verification.
    pub fn is_ocr(&self) -> bool {
        matches!(self, FieldStatus::Extracted | FieldStatus::Corrected)
    }
}

/// Per-parameter extraction record. Immutable once produced; operator
/// confirmation supersedes it rather than editing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractedField {
    pub field: LabField,
    pub raw_text: Option<String>,
    pub value: Option<f64>,
    pub status: FieldStatus,
    pub unit_hint: Option<String>,
}

impl ExtractedField {
    pub fn not_found(field: LabField) -> Self {
        Self {
            field,
            raw_text: None,
            value: None,
            status: FieldStatus::NotFound,
            unit_hint: None,
        }
    }

    pub fn manual(field: LabField, value: f64) -> Self {
        Self {
            field,
            raw_text: None,
            value: Some(value),
            status: FieldStatus::Manual,
            unit_hint: Some(field.unit().to_string()),
        }
    }

    pub fn is_found(&self) -> bool {
        self.value.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FlagSeverity {
    Critical,
    Alert,
    Notice,
}

/// A clinical or data-quality flag raised during extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Flag {
    pub field: LabField,
    pub severity: FlagSeverity,
    pub message: String,
}

impl Flag {
    pub fn new(field: LabField, severity: FlagSeverity, message: impl Into<String>) -> Self {
        Self {
            field,
            severity,
            message: message.into(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == FlagSeverity::Critical
    }
}

/// Flat view of an extraction batch for operator review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtractedValues {
    pub hemoglobin_g_dl: Option<f64>,
    pub hemoglobin_status: Option<FieldStatus>,
    pub hemoglobin_raw: Option<String>,
    pub platelets_per_ul: Option<u32>,
    pub platelets_lakh: Option<f64>,
    pub platelets_unit: Option<String>,
    pub platelets_status: Option<FieldStatus>,
    pub platelets_raw: Option<String>,
    pub bp_systolic: Option<u16>,
    pub bp_systolic_status: Option<FieldStatus>,
    pub bp_diastolic: Option<u16>,
    pub bp_diastolic_status: Option<FieldStatus>,
    pub bp_raw: Option<String>,
    pub gestational_age_weeks: Option<u8>,
    pub gestational_age_status: Option<FieldStatus>,
    pub proteinuria: Option<Proteinuria>,
    pub proteinuria_status: Option<FieldStatus>,
    pub proteinuria_raw: Option<String>,
    pub weight_kg: Option<f64>,
    pub weight_status: Option<FieldStatus>,
}

impl ExtractedValues {
    pub fn from_fields(fields: &[ExtractedField]) -> Self {
        let mut out = Self::default();
        for f in fields {
            match f.field {
                LabField::Hemoglobin => {
                    out.hemoglobin_g_dl = f.value;
                    out.hemoglobin_status = Some(f.status);
                    out.hemoglobin_raw = f.raw_text.clone();
                }
                LabField::Platelets => {
                    out.platelets_per_ul = f.value.map(|v| v.round() as u32);
                    out.platelets_lakh = f.value.map(|v| (v / 1_000.0).round() / 100.0);
                    out.platelets_unit = f.unit_hint.clone();
                    out.platelets_status = Some(f.status);
                    out.platelets_raw = f.raw_text.clone();
                }
                LabField::BpSystolic => {
                    out.bp_systolic = f.value.map(|v| v.round() as u16);
                    out.bp_systolic_status = Some(f.status);
                    if out.bp_raw.is_none() {
                        out.bp_raw = f.raw_text.clone();
                    }
                }
                LabField::BpDiastolic => {
                    out.bp_diastolic = f.value.map(|v| v.round() as u16);
                    out.bp_diastolic_status = Some(f.status);
                    if out.bp_raw.is_none() {
                        out.bp_raw = f.raw_text.clone();
                    }
                }
                LabField::GestationalAge => {
                    out.gestational_age_weeks = f.value.map(|v| v.round() as u8);
                    out.gestational_age_status = Some(f.status);
                }
                LabField::Proteinuria => {
                    out.proteinuria = f.value.and_then(Proteinuria::from_grade_value);
                    out.proteinuria_status = Some(f.status);
                    out.proteinuria_raw = f.raw_text.clone();
                }
                LabField::Weight => {
                    out.weight_kg = f.value;
                    out.weight_status = Some(f.status);
                }
            }
        }
        out
    }
}
