use bridge_core::models::risk::{Domain, Finding, FindingKind, Severity};
use bridge_core::models::symptom::{Symptom, SymptomCategory};
use bridge_core::models::vitals::VitalsSnapshot;

use crate::Rule;
use crate::thresholds::{abnormal_vital, anemic, bp_reading, elevated_bp, significant_proteinuria};

/// Symptoms in this many categories alongside an abnormal vital point to
/// more than one organ system.
pub const MULTI_SYSTEM_CATEGORIES: usize = 2;

/// Symptom escalations. Symptoms on their own never exceed MODERATE; they
/// escalate to HIGH only together with an abnormal vital.
pub struct Symptoms;

impl Rule for Symptoms {
    fn id(&self) -> &str {
        "symptoms"
    }

    fn domain(&self) -> Domain {
        Domain::Symptoms
    }

    fn evaluate(&self, v: &VitalsSnapshot) -> Vec<Finding> {
        let symptoms = v.symptoms();
        if symptoms.is_clear() {
            return Vec::new();
        }

        let neurological = symptoms.has_category(SymptomCategory::Neurological);
        let neuro_labels = || symptoms.labels_in(SymptomCategory::Neurological).join(", ");

        let mut findings = Vec::new();
        if elevated_bp(v) && symptoms.contains(Symptom::BlurredVision) {
            findings.push(Finding::new(
                FindingKind::VisualDisturbanceWithHypertension,
                self.domain(),
                Severity::High,
                format!("Blurred vision with BP {}: possible severe pre-eclampsia", bp_reading(v)),
            ));
        } else if elevated_bp(v) && neurological {
            findings.push(Finding::new(
                FindingKind::NeurologicalSymptomsWithHypertension,
                self.domain(),
                Severity::High,
                format!(
                    "{} with BP {}: pre-eclampsia suspected",
                    neuro_labels(),
                    bp_reading(v)
                ),
            ));
        }
        if significant_proteinuria(v) && neurological {
            findings.push(Finding::new(
                FindingKind::ProteinuriaWithNeurologicalSymptoms,
                self.domain(),
                Severity::High,
                format!(
                    "Proteinuria {} with {}: pre-eclampsia with neurological involvement suspected",
                    v.proteinuria(),
                    neuro_labels()
                ),
            ));
        }
        if elevated_bp(v) && symptoms.contains(Symptom::ReducedFetalMovement) {
            findings.push(Finding::new(
                FindingKind::ReducedFetalMovementWithHypertension,
                self.domain(),
                Severity::High,
                format!("Reduced fetal movement with BP {}: fetal compromise suspected", bp_reading(v)),
            ));
        }
        if anemic(v) && symptoms.contains(Symptom::Breathlessness) {
            findings.push(Finding::new(
                FindingKind::AnemiaWithBreathlessness,
                self.domain(),
                Severity::High,
                format!(
                    "Breathlessness with Hb {:.1} g/dL: possible cardiopulmonary compromise",
                    v.hemoglobin()
                ),
            ));
        }
        let categories = symptoms.category_count();
        if abnormal_vital(v) && categories >= MULTI_SYSTEM_CATEGORIES {
            findings.push(Finding::new(
                FindingKind::MultiSystemInvolvement,
                self.domain(),
                Severity::High,
                format!(
                    "Symptoms across {categories} body systems with abnormal vitals: multi-system involvement"
                ),
            ));
        }

        findings.push(Finding::new(
            FindingKind::SymptomsReported,
            self.domain(),
            Severity::Moderate,
            format!("Reported symptoms: {}", symptoms.labels().join(", ")),
        ));
        findings
    }
}
