use std::time::Duration;

use bridge_core::models::explanation::Explanation;
use bridge_core::models::risk::{RiskAssessment, RiskLevel};
use bridge_core::models::vitals::VitalsSnapshot;
use tracing::{debug, info, warn};

use crate::backend::GenerationParams;
use crate::prompt::build_prompt;
use crate::quality;
use crate::service::InferenceService;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Advisory explanation layer over the shared inference service.
///
/// `explain` is total: every failure on the model side ends in the
/// rule-derived fallback. It only reads the assessment and has no way to
/// hand back a different risk level.
#[derive(Clone)]
pub struct ExplanationGenerator {
    service: InferenceService,
    timeout: Duration,
    params: GenerationParams,
}

impl ExplanationGenerator {
    pub fn new(service: InferenceService) -> Self {
        Self {
            service,
            timeout: DEFAULT_TIMEOUT,
            params: GenerationParams::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn service(&self) -> &InferenceService {
        &self.service
    }

    pub async fn explain(&self, snapshot: &VitalsSnapshot, assessment: &RiskAssessment) -> Explanation {
        if !self.service.is_ready() {
            debug!(state = self.service.state().label(), "model not ready, using rule-derived explanation");
            return Explanation::fallback(fallback_text(assessment));
        }

        let prompt = build_prompt(snapshot, assessment);
        let raw = match self
            .service
            .generate(prompt, self.params.clone(), self.timeout)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "explanation generation failed, using rule-derived explanation");
                return Explanation::fallback(fallback_text(assessment));
            }
        };
        debug!(raw = %raw, "model output");

        match quality::review(&raw, assessment.risk_level) {
            Ok(text) => {
                info!(model = %self.service.model_name(), "model explanation passed quality control");
                Explanation::from_model(self.service.model_name(), text)
            }
            Err(rejection) => {
                warn!(reason = %rejection, "model explanation rejected, using rule-derived explanation");
                Explanation::fallback(fallback_text(assessment))
            }
        }
    }
}

/// Plain-language explanation assembled from the evidence list.
pub fn fallback_text(assessment: &RiskAssessment) -> String {
    let level = assessment.risk_level;
    let evidence: Vec<&str> = assessment
        .findings
        .iter()
        .map(|f| f.text.trim_end_matches('.'))
        .collect();

    if evidence.is_empty() {
        return format!(
            "Risk level {level}: all recorded values are within expected ranges. \
             Continue routine antenatal monitoring."
        );
    }

    let action = match level {
        RiskLevel::High => "Refer to a higher facility without delay.",
        RiskLevel::Moderate => "Arrange a review at the primary health centre.",
        RiskLevel::Low => "Continue routine antenatal monitoring.",
    };
    format!("Risk level {level} based on: {}. {action}", evidence.join("; "))
}
