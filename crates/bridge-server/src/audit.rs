use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use bridge_confirm::error::ConfirmError;

/// Domain actions worth an audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    TokenIssued,
    TokenConsumed,
    TokenRejected,
    ConfirmationInvalid,
    AssessmentCompleted,
    ExplanationFallback,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::TokenIssued => "token_issued",
            AuditAction::TokenConsumed => "token_consumed",
            AuditAction::TokenRejected => "token_rejected",
            AuditAction::ConfirmationInvalid => "confirmation_invalid",
            AuditAction::AssessmentCompleted => "assessment_completed",
            AuditAction::ExplanationFallback => "explanation_fallback",
        }
    }
}

/// A structured audit event, logged via `tracing`.
///
/// No patient identifiers are recorded; `resource_id` is a confirmation
/// token or `"direct"` for a one-shot assessment.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_id: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: AuditAction, resource_id: impl Into<String>) -> Self {
        Self {
            action,
            resource_id: resource_id.into(),
            details: None,
        }
    }

    /// Record of a confirm that did not complete. A bad token is rejected
    /// outright; invalid operator values leave the token pending for a
    /// corrected resubmission.
    pub fn confirm_failed(token: Uuid, error: &ConfirmError) -> Self {
        match error {
            ConfirmError::Token(e) => Self::new(AuditAction::TokenRejected, token.to_string())
                .with_details(json!({ "reason": e.to_string() })),
            ConfirmError::Validation(e) => {
                Self::new(AuditAction::ConfirmationInvalid, token.to_string()).with_details(json!({
                    "reason": e.to_string(),
                    "field": e.field(),
                    "token_pending": true,
                }))
            }
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = self.action.as_str(),
            audit.resource_id = %self.resource_id,
            audit.details = %details,
            "audit event"
        );
    }
}
