use jiff::{SignedDuration, Timestamp};
use serde::Serialize;
use uuid::Uuid;

use bridge_core::models::field::{ExtractedField, Flag};
use bridge_core::models::symptom::SymptomSet;
use bridge_core::models::vitals::PartialVitals;

/// Everything needed to finish an assessment once values are confirmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingAssessment {
    pub vitals: PartialVitals,
    pub fields: Vec<ExtractedField>,
    pub symptoms: SymptomSet,
    pub other_symptoms: Option<String>,
}

/// A single-use handle on a pending extraction batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationToken {
    pub id: Uuid,
    pub created_at: Timestamp,
    pub ttl: SignedDuration,
    pub pending: PendingAssessment,
    pub flags: Vec<Flag>,
    pub has_critical_flag: bool,
}

impl ConfirmationToken {
    pub fn expires_at(&self) -> Timestamp {
        self.created_at
            .checked_add(self.ttl)
            .unwrap_or(Timestamp::MAX)
    }

    /// Expired at or after the deadline; never extended.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at()
    }
}
