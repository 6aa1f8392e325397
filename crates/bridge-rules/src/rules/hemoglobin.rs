use bridge_core::models::risk::{Domain, Finding, FindingKind, Severity};
use bridge_core::models::vitals::VitalsSnapshot;

use crate::Rule;
use crate::thresholds::{ANEMIA_BELOW, SEVERE_ANEMIA_BELOW};

pub struct Hemoglobin;

impl Rule for Hemoglobin {
    fn id(&self) -> &str {
        "hemoglobin"
    }

    fn domain(&self) -> Domain {
        Domain::Hemoglobin
    }

    fn evaluate(&self, v: &VitalsSnapshot) -> Vec<Finding> {
        let hb = v.hemoglobin();
        if hb < SEVERE_ANEMIA_BELOW {
            vec![Finding::new(
                FindingKind::SevereAnemia,
                self.domain(),
                Severity::High,
                format!("Hb {hb:.1} g/dL: severe anemia (<7.0)"),
            )]
        } else if hb < ANEMIA_BELOW {
            vec![Finding::new(
                FindingKind::ModerateAnemia,
                self.domain(),
                Severity::Moderate,
                format!("Hb {hb:.1} g/dL: moderate anemia (7.0-10.9)"),
            )]
        } else {
            Vec::new()
        }
    }
}
