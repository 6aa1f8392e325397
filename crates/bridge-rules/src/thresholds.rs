//! WHO-style cut-points. Boundaries are inclusive on the severe side:
//! 160/110 is severe, 140/90 is elevated, Hb 7.0 is moderate not severe.

use bridge_core::models::proteinuria::Proteinuria;
use bridge_core::models::vitals::VitalsSnapshot;

pub const SEVERE_SYSTOLIC: u16 = 160;
pub const SEVERE_DIASTOLIC: u16 = 110;
pub const ELEVATED_SYSTOLIC: u16 = 140;
pub const ELEVATED_DIASTOLIC: u16 = 90;
pub const BORDERLINE_SYSTOLIC: u16 = 130;
pub const BORDERLINE_DIASTOLIC: u16 = 85;

pub const SEVERE_ANEMIA_BELOW: f64 = 7.0;
pub const ANEMIA_BELOW: f64 = 11.0;

pub const THROMBOCYTOPENIA_BELOW: u32 = 100_000;
pub const LOW_PLATELETS_BELOW: u32 = 150_000;

pub const SIGNIFICANT_PROTEINURIA: Proteinuria = Proteinuria::Plus2;

pub fn severe_hypertension(v: &VitalsSnapshot) -> bool {
    v.bp_systolic() >= SEVERE_SYSTOLIC || v.bp_diastolic() >= SEVERE_DIASTOLIC
}

/// Systolic ≥ 140 or diastolic ≥ 90, severe included.
pub fn elevated_bp(v: &VitalsSnapshot) -> bool {
    v.bp_systolic() >= ELEVATED_SYSTOLIC || v.bp_diastolic() >= ELEVATED_DIASTOLIC
}

pub fn borderline_bp(v: &VitalsSnapshot) -> bool {
    v.bp_systolic() >= BORDERLINE_SYSTOLIC || v.bp_diastolic() >= BORDERLINE_DIASTOLIC
}

pub fn anemic(v: &VitalsSnapshot) -> bool {
    v.hemoglobin() < ANEMIA_BELOW
}

pub fn significant_proteinuria(v: &VitalsSnapshot) -> bool {
    v.proteinuria() >= SIGNIFICANT_PROTEINURIA
}

/// Any vital that on its own earns a MODERATE finding or worse.
pub fn abnormal_vital(v: &VitalsSnapshot) -> bool {
    elevated_bp(v) || anemic(v) || v.platelets() < LOW_PLATELETS_BELOW || significant_proteinuria(v)
}

pub fn bp_reading(v: &VitalsSnapshot) -> String {
    format!("{}/{} mmHg", v.bp_systolic(), v.bp_diastolic())
}
