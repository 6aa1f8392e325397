//! bridge-rules
//!
//! The safety net: deterministic threshold rules over a vitals snapshot and
//! the recommendation synthesizer built on their findings. Pure functions,
//! no I/O, no model. The risk level produced here is the only risk level the
//! system ever reports.

pub mod catalog;
pub mod rules;
pub mod synthesis;
pub mod thresholds;

use bridge_core::models::risk::{Domain, Finding, RiskAssessment, RiskLevel};
use bridge_core::models::vitals::VitalsSnapshot;

pub use synthesis::synthesize;

/// Trait implemented by each clinical rule.
pub trait Rule: Send + Sync {
    /// Stable identifier (e.g. "blood_pressure").
    fn id(&self) -> &str;

    /// Domain the rule's findings are filed under.
    fn domain(&self) -> Domain;

    /// Every condition this rule detects in the snapshot. A rule reports at
    /// most one finding per condition and may report none.
    fn evaluate(&self, vitals: &VitalsSnapshot) -> Vec<Finding>;
}

/// Return all registered rules.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(rules::blood_pressure::BloodPressure),
        Box::new(rules::hemoglobin::Hemoglobin),
        Box::new(rules::platelets::Platelets),
        Box::new(rules::proteinuria::Proteinuria),
        Box::new(rules::symptoms::Symptoms),
    ]
}

/// Look up a rule by id.
pub fn get_rule(id: &str) -> Option<Box<dyn Rule>> {
    all_rules().into_iter().find(|r| r.id() == id)
}

/// Run every rule and take the worst qualifying severity.
///
/// Findings are ordered by descending severity, then by domain priority
/// (blood pressure, labs, proteinuria, symptoms). The sort is stable so the
/// result is identical for identical input.
pub fn evaluate(vitals: &VitalsSnapshot) -> RiskAssessment {
    let mut findings: Vec<Finding> = all_rules()
        .iter()
        .flat_map(|rule| rule.evaluate(vitals))
        .collect();
    findings.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.domain.cmp(&b.domain)));

    let risk_level = findings
        .iter()
        .map(|f| f.severity.risk_level())
        .max()
        .unwrap_or(RiskLevel::Low);

    RiskAssessment {
        risk_level,
        findings,
        recommendations: Vec::new(),
    }
}

/// Evaluate and attach synthesized recommendations.
pub fn assess(vitals: &VitalsSnapshot) -> RiskAssessment {
    let mut assessment = evaluate(vitals);
    assessment.recommendations = synthesize(&assessment, vitals.symptoms());
    assessment
}
