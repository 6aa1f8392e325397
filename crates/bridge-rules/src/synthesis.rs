use std::collections::HashSet;

use bridge_core::models::recommendation::{ActionKey, Priority, Recommendation};
use bridge_core::models::risk::{RiskAssessment, RiskLevel};
use bridge_core::models::symptom::SymptomSet;

use crate::catalog::{action_for, recommend};

/// Map findings to a prioritized, de-duplicated recommendation list.
///
/// Findings arrive most severe first, so the first finding to claim an
/// action key wins. A HIGH assessment always carries at least one urgent
/// entry.
pub fn synthesize(assessment: &RiskAssessment, symptoms: &SymptomSet) -> Vec<Recommendation> {
    let mut actions: Vec<ActionKey> = assessment
        .findings
        .iter()
        .map(|f| action_for(f.kind))
        .collect();

    if !symptoms.is_clear() {
        actions.push(ActionKey::MonitorSymptoms);
    }
    if assessment.risk_level == RiskLevel::Low {
        actions.push(ActionKey::RoutineMonitoring);
    }

    let mut seen = HashSet::new();
    let mut recs: Vec<Recommendation> = actions
        .into_iter()
        .filter(|key| seen.insert(key.clone()))
        .map(recommend)
        .collect();

    if assessment.risk_level == RiskLevel::High
        && !recs.iter().any(|r| r.priority == Priority::Urgent)
    {
        recs.push(recommend(ActionKey::UrgentReferral));
    }

    recs.sort_by_key(|r| r.priority);
    recs
}
