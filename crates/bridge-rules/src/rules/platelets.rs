use bridge_core::models::risk::{Domain, Finding, FindingKind, Severity};
use bridge_core::models::vitals::VitalsSnapshot;

use crate::Rule;
use crate::thresholds::{LOW_PLATELETS_BELOW, THROMBOCYTOPENIA_BELOW};

pub struct Platelets;

impl Rule for Platelets {
    fn id(&self) -> &str {
        "platelets"
    }

    fn domain(&self) -> Domain {
        Domain::Platelets
    }

    fn evaluate(&self, v: &VitalsSnapshot) -> Vec<Finding> {
        let count = v.platelets();
        if count < THROMBOCYTOPENIA_BELOW {
            vec![Finding::new(
                FindingKind::Thrombocytopenia,
                self.domain(),
                Severity::High,
                format!("Platelets {count}/µL: thrombocytopenia (<100,000)"),
            )]
        } else if count < LOW_PLATELETS_BELOW {
            vec![Finding::new(
                FindingKind::LowPlatelets,
                self.domain(),
                Severity::Moderate,
                format!("Platelets {count}/µL: low platelet count (100,000-149,999)"),
            )]
        } else {
            Vec::new()
        }
    }
}
