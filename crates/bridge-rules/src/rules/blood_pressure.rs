use bridge_core::models::risk::{Domain, Finding, FindingKind, Severity};
use bridge_core::models::vitals::VitalsSnapshot;

use crate::Rule;
use crate::thresholds::{bp_reading, borderline_bp, elevated_bp, severe_hypertension};

pub struct BloodPressure;

impl Rule for BloodPressure {
    fn id(&self) -> &str {
        "blood_pressure"
    }

    fn domain(&self) -> Domain {
        Domain::BloodPressure
    }

    /// Reports only the most severe tier reached.
    fn evaluate(&self, v: &VitalsSnapshot) -> Vec<Finding> {
        let reading = bp_reading(v);
        let weeks = v.gestational_age_weeks();

        let finding = if severe_hypertension(v) {
            Finding::new(
                FindingKind::SevereHypertension,
                self.domain(),
                Severity::High,
                format!("BP {reading} at {weeks} weeks: severe hypertension (≥160/110)"),
            )
        } else if elevated_bp(v) {
            Finding::new(
                FindingKind::Hypertension,
                self.domain(),
                Severity::Moderate,
                format!("BP {reading} at {weeks} weeks: hypertension (≥140/90)"),
            )
        } else if borderline_bp(v) {
            Finding::new(
                FindingKind::BorderlineBloodPressure,
                self.domain(),
                Severity::Note,
                format!("BP {reading}: borderline, recheck advised (≥130/85)"),
            )
        } else {
            return Vec::new();
        };
        vec![finding]
    }
}
