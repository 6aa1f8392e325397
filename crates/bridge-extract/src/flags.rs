//! Clinical flags raised on OCR-read values.
//!
//! Critical thresholds mark values that must be verified by the health
//! worker before they are trusted: a misread at these extremes changes the
//! referral decision. Manually entered values are never flagged here.

use bridge_core::models::field::{ExtractedField, Flag, FlagSeverity, LabField};
use bridge_core::models::proteinuria::Proteinuria;

pub const CRITICAL_HEMOGLOBIN_BELOW: f64 = 7.0;
pub const ALERT_HEMOGLOBIN_BELOW: f64 = 9.0;
pub const CRITICAL_PLATELETS_BELOW: f64 = 50_000.0;
pub const ALERT_PLATELETS_BELOW: f64 = 100_000.0;
pub const CRITICAL_SYSTOLIC_AT: f64 = 160.0;
pub const CRITICAL_DIASTOLIC_AT: f64 = 110.0;
pub const CRITICAL_PROTEINURIA_AT: Proteinuria = Proteinuria::Plus3;

/// Threshold flags for one field. Only OCR-sourced values are considered.
pub fn clinical_flags(field: &ExtractedField) -> Vec<Flag> {
    let Some(value) = field.value else {
        return Vec::new();
    };
    if !field.status.is_ocr() {
        return Vec::new();
    }

    let mut flags = Vec::new();
    match field.field {
        LabField::Hemoglobin => {
            if value < CRITICAL_HEMOGLOBIN_BELOW {
                flags.push(Flag::new(
                    LabField::Hemoglobin,
                    FlagSeverity::Critical,
                    format!("Hemoglobin {value} g/dL is critically low (<{CRITICAL_HEMOGLOBIN_BELOW})"),
                ));
            } else if value < ALERT_HEMOGLOBIN_BELOW {
                flags.push(Flag::new(
                    LabField::Hemoglobin,
                    FlagSeverity::Alert,
                    format!("Hemoglobin {value} g/dL is low (<{ALERT_HEMOGLOBIN_BELOW})"),
                ));
            }
        }
        LabField::Platelets => {
            if value < CRITICAL_PLATELETS_BELOW {
                flags.push(Flag::new(
                    LabField::Platelets,
                    FlagSeverity::Critical,
                    format!("Platelets {value}/µL are critically low (<50,000)"),
                ));
            } else if value < ALERT_PLATELETS_BELOW {
                flags.push(Flag::new(
                    LabField::Platelets,
                    FlagSeverity::Alert,
                    format!("Platelets {value}/µL are low (<100,000)"),
                ));
            }
        }
        LabField::BpSystolic if value >= CRITICAL_SYSTOLIC_AT => {
            flags.push(Flag::new(
                LabField::BpSystolic,
                FlagSeverity::Critical,
                format!("Systolic pressure {value} mmHg is in the severe range (≥{CRITICAL_SYSTOLIC_AT})"),
            ));
        }
        LabField::BpDiastolic if value >= CRITICAL_DIASTOLIC_AT => {
            flags.push(Flag::new(
                LabField::BpDiastolic,
                FlagSeverity::Critical,
                format!("Diastolic pressure {value} mmHg is in the severe range (≥{CRITICAL_DIASTOLIC_AT})"),
            ));
        }
        LabField::Proteinuria => {
            if Proteinuria::from_grade_value(value).is_some_and(|p| p >= CRITICAL_PROTEINURIA_AT) {
                flags.push(Flag::new(
                    LabField::Proteinuria,
                    FlagSeverity::Critical,
                    "Urine protein +3 or higher",
                ));
            }
        }
        _ => {}
    }
    flags
}
