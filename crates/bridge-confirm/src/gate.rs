use serde::Serialize;

use bridge_core::models::field::{Flag, FlagSeverity, LabField};
use bridge_extract::Extraction;

/// Why a batch needs operator review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "field", rename_all = "snake_case")]
pub enum GateReason {
    /// A field required for assessment was not found.
    Missing(LabField),
    /// An OCR value crossed a critical threshold.
    Critical(LabField),
    /// An OCR value was repaired, had its unit assumed, or was discarded.
    Uncertain(LabField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    ProceedDirectly,
    RequireConfirmation {
        reasons: Vec<GateReason>,
        has_critical_flags: bool,
    },
}

impl GateDecision {
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, GateDecision::RequireConfirmation { .. })
    }
}

const REQUIRED: [LabField; 4] = [
    LabField::Hemoglobin,
    LabField::Platelets,
    LabField::BpSystolic,
    LabField::BpDiastolic,
];

/// Decide whether an extraction batch can go straight to the rule engine.
///
/// Confirmation is required when hemoglobin, platelets or either blood
/// pressure component is missing, when an OCR value trips a critical
/// threshold, or when extraction had to guess.
pub fn decide(extraction: &Extraction) -> GateDecision {
    let mut reasons: Vec<GateReason> = REQUIRED
        .into_iter()
        .filter(|f| extraction.is_missing(*f))
        .map(GateReason::Missing)
        .collect();

    for flag in extraction.flags() {
        let reason = match flag.severity {
            FlagSeverity::Critical => GateReason::Critical(flag.field),
            FlagSeverity::Notice => GateReason::Uncertain(flag.field),
            FlagSeverity::Alert => continue,
        };
        if !reasons.contains(&reason) {
            reasons.push(reason);
        }
    }

    if reasons.is_empty() {
        GateDecision::ProceedDirectly
    } else {
        GateDecision::RequireConfirmation {
            has_critical_flags: extraction.has_critical_flags(),
            reasons,
        }
    }
}

/// Operator-facing summary for a pending batch.
pub fn pending_message(has_critical_flags: bool) -> &'static str {
    if has_critical_flags {
        "Critical values detected. Verify them against the lab report before the assessment runs."
    } else {
        "Lab values extracted. Please verify them before the assessment runs."
    }
}

/// Flags to show the operator, with a notice for every missing required field.
pub fn review_flags(extraction: &Extraction, decision: &GateDecision) -> Vec<Flag> {
    let mut flags = extraction.flags().to_vec();
    if let GateDecision::RequireConfirmation { reasons, .. } = decision {
        for reason in reasons {
            if let GateReason::Missing(field) = reason {
                flags.push(Flag::new(
                    *field,
                    FlagSeverity::Notice,
                    format!("{field} not found on the report; enter it manually"),
                ));
            }
        }
    }
    flags
}
