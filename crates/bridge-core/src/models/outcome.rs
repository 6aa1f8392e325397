use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::models::explanation::Explanation;
use crate::models::field::{ExtractedValues, Flag};
use crate::models::recommendation::RecommendationEntry;
use crate::models::risk::RiskLevel;

/// Finished assessment returned to the field worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentResult {
    pub risk_level: RiskLevel,
    pub referral_required: bool,
    pub evidence_summary: Vec<String>,
    pub recommendations: Vec<RecommendationEntry>,
    pub ai_explanation: Explanation,
    pub extracted_data: Option<ExtractedValues>,
    pub operator_notes: Option<String>,
    pub processing_ms: u64,
}

/// Returned instead of a result when extracted values need operator review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PendingConfirmation {
    pub confirmation_token: Uuid,
    pub expires_at: jiff::Timestamp,
    pub extracted_values: ExtractedValues,
    pub flags: Vec<Flag>,
    pub has_critical_flags: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum AssessmentOutcome {
    Completed(AssessmentResult),
    PendingConfirmation(PendingConfirmation),
}

impl AssessmentOutcome {
    pub fn result(&self) -> Option<&AssessmentResult> {
        match self {
            AssessmentOutcome::Completed(result) => Some(result),
            AssessmentOutcome::PendingConfirmation(_) => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        match self {
            AssessmentOutcome::Completed(_) => None,
            AssessmentOutcome::PendingConfirmation(pending) => Some(pending),
        }
    }
}
