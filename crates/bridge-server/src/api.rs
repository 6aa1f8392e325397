use serde::Deserialize;
use uuid::Uuid;

use bridge_core::models::proteinuria::Proteinuria;
use bridge_core::models::vitals::PartialVitals;

/// Direct assessment: OCR text from a lab report, manually entered vitals,
/// or both. Manual values win over OCR readings of the same field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessRequest {
    pub gestational_age_weeks: Option<u8>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub other_symptoms: Option<String>,
    #[serde(default, alias = "ocr_text")]
    pub lab_report_text: Option<String>,
    pub bp_systolic: Option<u16>,
    pub bp_diastolic: Option<u16>,
    #[serde(alias = "hemoglobin_g_dl")]
    pub hemoglobin: Option<f64>,
    #[serde(alias = "platelets")]
    pub platelets_per_ul: Option<u32>,
    pub proteinuria: Option<Proteinuria>,
    pub weight_kg: Option<f64>,
}

impl AssessRequest {
    pub fn manual_vitals(&self) -> PartialVitals {
        PartialVitals {
            bp_systolic: self.bp_systolic,
            bp_diastolic: self.bp_diastolic,
            hemoglobin: self.hemoglobin,
            platelets: self.platelets_per_ul,
            gestational_age_weeks: self.gestational_age_weeks,
            proteinuria: self.proteinuria,
            weight_kg: self.weight_kg,
        }
    }

    pub fn report_text(&self) -> Option<&str> {
        self.lab_report_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Operator-verified values for a pending assessment. Omitted values keep
/// what extraction found.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmRequest {
    pub confirmation_token: Uuid,
    pub confirmed_hemoglobin: Option<f64>,
    pub confirmed_platelets_per_ul: Option<u32>,
    pub confirmed_bp_systolic: Option<u16>,
    pub confirmed_bp_diastolic: Option<u16>,
    pub confirmed_gestational_age: Option<u8>,
    pub confirmed_proteinuria: Option<Proteinuria>,
    pub confirmed_weight_kg: Option<f64>,
    #[serde(default, alias = "anm_notes")]
    pub notes: Option<String>,
}

impl ConfirmRequest {
    pub fn operator_vitals(&self) -> PartialVitals {
        PartialVitals {
            bp_systolic: self.confirmed_bp_systolic,
            bp_diastolic: self.confirmed_bp_diastolic,
            hemoglobin: self.confirmed_hemoglobin,
            platelets: self.confirmed_platelets_per_ul,
            gestational_age_weeks: self.confirmed_gestational_age,
            proteinuria: self.confirmed_proteinuria,
            weight_kg: self.confirmed_weight_kg,
        }
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}
