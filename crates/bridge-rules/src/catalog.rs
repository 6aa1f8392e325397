//! Fixed action catalog: priority, rationale and a field note per action.

use bridge_core::models::recommendation::{ActionKey, Priority, Recommendation};
use bridge_core::models::risk::FindingKind;

pub struct CatalogEntry {
    pub priority: Priority,
    pub rationale: &'static str,
    pub practical_note: &'static str,
}

const fn entry(priority: Priority, rationale: &'static str, practical_note: &'static str) -> CatalogEntry {
    CatalogEntry {
        priority,
        rationale,
        practical_note,
    }
}

/// Catalog entry for a known action; `None` for keys outside the catalog.
pub fn lookup(action: &ActionKey) -> Option<CatalogEntry> {
    use Priority::*;

    let found = match action {
        ActionKey::UrgentReferFacility => entry(
            Urgent,
            "Refer immediately to a facility with obstetric care for severe hypertension",
            "Arrange transport today. Recheck BP after 15 minutes of rest before leaving if possible.",
        ),
        ActionKey::UrgentReferPreeclampsia => entry(
            Urgent,
            "Refer immediately for suspected pre-eclampsia evaluation",
            "Ask about headache, visual changes and upper abdominal pain; do not delay transfer.",
        ),
        ActionKey::UrgentReferAnemia => entry(
            Urgent,
            "Refer urgently for management of severe anemia",
            "Send the lab report with the patient; the facility may need to arrange transfusion.",
        ),
        ActionKey::UrgentReferHellp => entry(
            Urgent,
            "Refer urgently for low platelet count to rule out HELLP syndrome",
            "Look for bleeding gums, bruising or pain under the right ribs.",
        ),
        ActionKey::UrgentFetalAssessment => entry(
            Urgent,
            "Refer urgently for fetal well-being assessment",
            "Ask the mother to count kicks on the way; fewer than 10 in 2 hours needs immediate review.",
        ),
        ActionKey::UrgentReferral => entry(
            Urgent,
            "Refer urgently to the nearest facility for review of high-risk findings",
            "Send this assessment summary with the patient.",
        ),
        ActionKey::PhcBpReview => entry(
            NearTerm,
            "Review blood pressure at the PHC within 48 hours",
            "Record BP daily until the review.",
        ),
        ActionKey::NearTermCbcIron => entry(
            NearTerm,
            "Repeat CBC and start or review iron-folic acid supplementation",
            "Take iron tablets with water or lemon juice, not tea.",
        ),
        ActionKey::NearTermReferPlatelets => entry(
            NearTerm,
            "Repeat platelet count at the PHC within a week",
            "Note any unusual bruising or bleeding.",
        ),
        ActionKey::UrineProteinRecheck => entry(
            NearTerm,
            "Repeat urine protein testing",
            "Use a clean-catch midstream sample.",
        ),
        ActionKey::PhcReferralSymptoms => entry(
            NearTerm,
            "Refer to the PHC for review of the reported danger signs",
            "Return immediately if the symptoms get worse.",
        ),
        ActionKey::RecheckBp => entry(
            FollowUp,
            "Recheck blood pressure at the next visit",
            "Measure seated, after 5 minutes of rest, arm at heart level.",
        ),
        ActionKey::MonitorSymptoms => entry(
            FollowUp,
            "Monitor the reported symptoms and review at the next visit",
            "Teach the family which danger signs need immediate care.",
        ),
        ActionKey::RoutineMonitoring => entry(
            FollowUp,
            "Continue routine antenatal care",
            "Keep the next scheduled ANC visit and continue IFA and calcium.",
        ),
        ActionKey::Other(_) => return None,
    };
    Some(found)
}

/// Canonical action for a finding.
pub fn action_for(kind: FindingKind) -> ActionKey {
    match kind {
        FindingKind::SevereHypertension => ActionKey::UrgentReferFacility,
        FindingKind::Hypertension => ActionKey::PhcBpReview,
        FindingKind::BorderlineBloodPressure => ActionKey::RecheckBp,
        FindingKind::SevereAnemia | FindingKind::AnemiaWithBreathlessness => {
            ActionKey::UrgentReferAnemia
        }
        FindingKind::ModerateAnemia => ActionKey::NearTermCbcIron,
        FindingKind::Thrombocytopenia => ActionKey::UrgentReferHellp,
        FindingKind::LowPlatelets => ActionKey::NearTermReferPlatelets,
        FindingKind::PreeclampsiaPattern
        | FindingKind::VisualDisturbanceWithHypertension
        | FindingKind::NeurologicalSymptomsWithHypertension
        | FindingKind::ProteinuriaWithNeurologicalSymptoms => ActionKey::UrgentReferPreeclampsia,
        FindingKind::SignificantProteinuria | FindingKind::TraceProteinuria => {
            ActionKey::UrineProteinRecheck
        }
        FindingKind::ReducedFetalMovementWithHypertension => ActionKey::UrgentFetalAssessment,
        FindingKind::MultiSystemInvolvement => ActionKey::UrgentReferral,
        FindingKind::SymptomsReported => ActionKey::PhcReferralSymptoms,
        FindingKind::PatientReported => ActionKey::MonitorSymptoms,
    }
}

/// Render an action as a recommendation. Keys outside the catalog get a
/// humanized rationale and follow-up priority.
pub fn recommend(action: ActionKey) -> Recommendation {
    match lookup(&action) {
        Some(e) => Recommendation {
            action,
            priority: e.priority,
            rationale: e.rationale.to_string(),
            practical_note: Some(e.practical_note.to_string()),
        },
        None => Recommendation {
            rationale: action.humanize(),
            action,
            priority: Priority::FollowUp,
            practical_note: None,
        },
    }
}
