use bridge_core::models::field::{FieldStatus, LabField};
use bridge_core::models::vitals::PartialVitals;
use bridge_extract::{Extraction, extract};

#[test]
fn manual_entry_is_never_flagged() {
    let manual = PartialVitals {
        platelets: Some(45_000),
        bp_systolic: Some(165),
        bp_diastolic: Some(112),
        hemoglobin: Some(6.5),
        ..PartialVitals::default()
    };
    let extraction = Extraction::from_manual(&manual);
    assert!(extraction.flags().is_empty());
    let plt = extraction.field(LabField::Platelets).unwrap();
    assert_eq!(plt.status, FieldStatus::Manual);
    assert_eq!(plt.value, Some(45_000.0));
    assert!(extraction.is_missing(LabField::Weight));
}

#[test]
fn manual_values_override_ocr_and_drop_their_flags() {
    let manual = PartialVitals {
        platelets: Some(210_000),
        ..PartialVitals::default()
    };
    let extraction = extract("Platelets: 45,000 /cumm\nHb: 11.0 g/dL").with_manual(&manual);
    assert!(!extraction.has_critical_flags());
    let plt = extraction.field(LabField::Platelets).unwrap();
    assert_eq!(plt.value, Some(210_000.0));
    assert_eq!(plt.status, FieldStatus::Manual);
    assert_eq!(
        extraction.field(LabField::Hemoglobin).unwrap().status,
        FieldStatus::Extracted
    );
}
