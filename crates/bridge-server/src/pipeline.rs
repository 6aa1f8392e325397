use std::time::Instant;

use jiff::Timestamp;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use bridge_confirm::error::ConfirmError;
use bridge_confirm::gate::{pending_message, review_flags};
use bridge_confirm::merge::merge;
use bridge_confirm::{PendingAssessment, TokenStore, decide};
use bridge_core::error::ValidationError;
use bridge_core::models::field::{ExtractedField, ExtractedValues};
use bridge_core::models::outcome::{AssessmentOutcome, AssessmentResult, PendingConfirmation};
use bridge_core::models::recommendation::RecommendationEntry;
use bridge_core::models::symptom::SymptomSet;
use bridge_core::models::vitals::{PartialVitals, VitalsSnapshot};
use bridge_extract::Extraction;
use bridge_llm::ExplanationGenerator;

use crate::api::{AssessRequest, ConfirmRequest};
use crate::audit::{AuditAction, AuditEvent};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Confirm(#[from] ConfirmError),
}

/// What the tail of the pipeline needs besides the snapshot.
struct Context {
    other_symptoms: Option<String>,
    extracted: Option<ExtractedValues>,
    operator_notes: Option<String>,
    started: Instant,
}

/// The assessment orchestrator.
///
/// Risk is always computed by the rule engine before the explanation layer
/// runs, and the result's level is copied from that assessment alone.
#[derive(Clone)]
pub struct Pipeline {
    tokens: TokenStore,
    explainer: ExplanationGenerator,
}

impl Pipeline {
    pub fn new(tokens: TokenStore, explainer: ExplanationGenerator) -> Self {
        Self { tokens, explainer }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn explainer(&self) -> &ExplanationGenerator {
        &self.explainer
    }

    /// Direct flow: extraction, gate, then either a pending confirmation or
    /// a finished result.
    pub async fn assess(&self, request: AssessRequest) -> Result<AssessmentOutcome, PipelineError> {
        let started = Instant::now();
        let symptoms = SymptomSet::try_from(request.symptoms.clone())?;
        let manual = request.manual_vitals();
        manual.validate()?;

        let from_report = request.report_text().is_some();
        let extraction = match request.report_text() {
            Some(text) => bridge_extract::extract(text).with_manual(&manual),
            None => Extraction::from_manual(&manual),
        };

        let decision = decide(&extraction);
        if decision.requires_confirmation() {
            let flags = review_flags(&extraction, &decision);
            let has_critical_flags = extraction.has_critical_flags();
            let extracted_values = extraction.values();
            let pending = PendingAssessment {
                vitals: extraction.partial(),
                fields: extraction.fields().to_vec(),
                symptoms,
                other_symptoms: request.other_symptoms.clone(),
            };
            let token = self.tokens.issue(pending, flags.clone(), Timestamp::now()).await;

            AuditEvent::new(AuditAction::TokenIssued, token.id.to_string())
                .with_details(json!({
                    "critical": has_critical_flags,
                    "flags": flags.len(),
                    "source": if from_report { "lab_report" } else { "manual" },
                }))
                .emit();

            return Ok(AssessmentOutcome::PendingConfirmation(PendingConfirmation {
                confirmation_token: token.id,
                expires_at: token.expires_at(),
                extracted_values,
                flags,
                has_critical_flags,
                message: pending_message(has_critical_flags).to_string(),
            }));
        }

        let snapshot = extraction.partial().complete(symptoms)?;
        let context = Context {
            other_symptoms: request.other_symptoms,
            extracted: from_report.then(|| extraction.values()),
            operator_notes: None,
            started,
        };
        let result = self.finish("direct", &snapshot, context).await;
        Ok(AssessmentOutcome::Completed(result))
    }

    /// Confirm flow: atomically consume the token, merge the operator's
    /// values over the extracted ones, then run the same tail as a direct
    /// assessment.
    pub async fn confirm(&self, request: ConfirmRequest) -> Result<AssessmentResult, PipelineError> {
        let started = Instant::now();
        let id = request.confirmation_token;
        let operator = request.operator_vitals();

        let consumed = self
            .tokens
            .consume_with(id, Timestamp::now(), |token| {
                let snapshot = merge(token, &operator)?;
                let fields = confirmed_fields(&token.pending.fields, &operator);
                Ok::<_, ConfirmError>((snapshot, fields, token.pending.other_symptoms.clone()))
            })
            .await;

        let (snapshot, fields, other_symptoms) = match consumed {
            Ok(parts) => parts,
            Err(e) => {
                AuditEvent::confirm_failed(id, &e).emit();
                return Err(e.into());
            }
        };

        AuditEvent::new(AuditAction::TokenConsumed, id.to_string())
            .with_details(json!({
                "operator_fields": operator.present().iter().map(|(f, _)| f.as_str()).collect::<Vec<_>>(),
                "notes": request.notes(),
            }))
            .emit();

        let context = Context {
            other_symptoms,
            extracted: Some(ExtractedValues::from_fields(&fields)),
            operator_notes: request.notes().map(str::to_string),
            started,
        };
        Ok(self.finish(&id.to_string(), &snapshot, context).await)
    }

    async fn finish(&self, resource: &str, snapshot: &VitalsSnapshot, context: Context) -> AssessmentResult {
        let mut assessment = bridge_rules::evaluate(snapshot);
        if let Some(text) = &context.other_symptoms {
            assessment.note_patient_report(text);
        }
        assessment.recommendations = bridge_rules::synthesize(&assessment, snapshot.symptoms());

        let explanation = self.explainer.explain(snapshot, &assessment).await;
        if explanation.is_fallback() {
            AuditEvent::new(AuditAction::ExplanationFallback, resource)
                .with_details(json!({ "model_state": self.explainer.service().state().label() }))
                .emit();
        }

        let result = AssessmentResult {
            risk_level: assessment.risk_level,
            referral_required: assessment.referral_required(),
            evidence_summary: assessment.evidence_summary(),
            recommendations: assessment
                .recommendations
                .into_iter()
                .map(RecommendationEntry::from)
                .collect(),
            ai_explanation: explanation,
            extracted_data: context.extracted,
            operator_notes: context.operator_notes,
            processing_ms: u64::try_from(context.started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        AuditEvent::new(AuditAction::AssessmentCompleted, resource)
            .with_details(json!({
                "risk_level": result.risk_level,
                "referral_required": result.referral_required,
                "explanation_source": result.ai_explanation.source.as_str(),
            }))
            .emit();
        info!(
            risk = %result.risk_level,
            findings = result.evidence_summary.len(),
            processing_ms = result.processing_ms,
            "assessment completed"
        );
        result
    }
}

/// Pending fields with the operator's values marked as manual entries.
fn confirmed_fields(pending: &[ExtractedField], operator: &PartialVitals) -> Vec<ExtractedField> {
    let entered = operator.present();
    pending
        .iter()
        .map(|f| {
            entered
                .iter()
                .find(|(field, _)| *field == f.field)
                .map_or_else(|| f.clone(), |(field, value)| ExtractedField::manual(*field, *value))
        })
        .collect()
}
