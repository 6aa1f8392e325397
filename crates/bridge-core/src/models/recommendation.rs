use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

/// Recommended action. Keys outside the catalog are carried through as
/// `Other` so records written by newer versions still render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKey {
    UrgentReferFacility,
    UrgentReferPreeclampsia,
    UrgentReferAnemia,
    UrgentReferHellp,
    UrgentFetalAssessment,
    UrgentReferral,
    PhcBpReview,
    NearTermCbcIron,
    NearTermReferPlatelets,
    UrineProteinRecheck,
    PhcReferralSymptoms,
    RecheckBp,
    MonitorSymptoms,
    RoutineMonitoring,
    Other(String),
}

impl ActionKey {
    const KNOWN: [ActionKey; 14] = [
        ActionKey::UrgentReferFacility,
        ActionKey::UrgentReferPreeclampsia,
        ActionKey::UrgentReferAnemia,
        ActionKey::UrgentReferHellp,
        ActionKey::UrgentFetalAssessment,
        ActionKey::UrgentReferral,
        ActionKey::PhcBpReview,
        ActionKey::NearTermCbcIron,
        ActionKey::NearTermReferPlatelets,
        ActionKey::UrineProteinRecheck,
        ActionKey::PhcReferralSymptoms,
        ActionKey::RecheckBp,
        ActionKey::MonitorSymptoms,
        ActionKey::RoutineMonitoring,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ActionKey::UrgentReferFacility => "urgent_refer_facility",
            ActionKey::UrgentReferPreeclampsia => "urgent_refer_preeclampsia",
            ActionKey::UrgentReferAnemia => "urgent_refer_anemia",
            ActionKey::UrgentReferHellp => "urgent_refer_hellp",
            ActionKey::UrgentFetalAssessment => "urgent_fetal_assessment",
            ActionKey::UrgentReferral => "urgent_referral",
            ActionKey::PhcBpReview => "phc_bp_review",
            ActionKey::NearTermCbcIron => "near_term_cbc_iron",
            ActionKey::NearTermReferPlatelets => "near_term_refer_platelets",
            ActionKey::UrineProteinRecheck => "urine_protein_recheck",
            ActionKey::PhcReferralSymptoms => "phc_referral_symptoms",
            ActionKey::RecheckBp => "recheck_bp",
            ActionKey::MonitorSymptoms => "monitor_symptoms",
            ActionKey::RoutineMonitoring => "routine_monitoring",
            ActionKey::Other(key) => key,
        }
    }

    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        ActionKey::KNOWN
            .into_iter()
            .find(|k| k.as_str() == key)
            .unwrap_or_else(|| ActionKey::Other(key.to_string()))
    }

    /// Generic human label derived from the key itself,
    /// e.g. `check_fundal_height` → "Check fundal height".
    pub fn humanize(&self) -> String {
        let words = self
            .as_str()
            .split(['_', '-'])
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let mut chars = words.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "Follow up with the health facility".to_string(),
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ActionKey::parse(&raw))
    }
}

/// Ordered `Urgent < NearTerm < FollowUp`; sorting ascending puts the most
/// pressing action first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Priority {
    Urgent,
    NearTerm,
    FollowUp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendation {
    #[ts(type = "string")]
    pub action: ActionKey,
    pub priority: Priority,
    pub rationale: String,
    pub practical_note: Option<String>,
}

/// A recommendation as stored or transmitted: either legacy free text or a
/// structured entry. On the wire this is a plain string or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum RecommendationEntry {
    LegacyText(String),
    Structured(Recommendation),
}

impl From<Recommendation> for RecommendationEntry {
    fn from(rec: Recommendation) -> Self {
        RecommendationEntry::Structured(rec)
    }
}
