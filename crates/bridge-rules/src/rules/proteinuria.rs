use bridge_core::models::proteinuria::Proteinuria as Grade;
use bridge_core::models::risk::{Domain, Finding, FindingKind, Severity};
use bridge_core::models::vitals::VitalsSnapshot;

use crate::Rule;
use crate::thresholds::{SIGNIFICANT_PROTEINURIA, bp_reading, elevated_bp};

pub struct Proteinuria;

impl Rule for Proteinuria {
    fn id(&self) -> &str {
        "proteinuria"
    }

    fn domain(&self) -> Domain {
        Domain::Proteinuria
    }

    fn evaluate(&self, v: &VitalsSnapshot) -> Vec<Finding> {
        let grade = v.proteinuria();
        let finding = if grade >= SIGNIFICANT_PROTEINURIA && elevated_bp(v) {
            Finding::new(
                FindingKind::PreeclampsiaPattern,
                self.domain(),
                Severity::High,
                format!(
                    "Proteinuria {grade} with BP {}: pre-eclampsia pattern",
                    bp_reading(v)
                ),
            )
        } else if grade >= SIGNIFICANT_PROTEINURIA {
            Finding::new(
                FindingKind::SignificantProteinuria,
                self.domain(),
                Severity::Moderate,
                format!("Proteinuria {grade}: significant proteinuria"),
            )
        } else if grade == Grade::Plus1 {
            Finding::new(
                FindingKind::TraceProteinuria,
                self.domain(),
                Severity::Note,
                "Proteinuria +1: trace protein, repeat test advised",
            )
        } else {
            return Vec::new();
        };
        vec![finding]
    }
}
