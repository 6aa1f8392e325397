use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::models::recommendation::Recommendation;

/// Authoritative risk level, totally ordered `Low < Moderate < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised risk level {0:?}")]
pub struct UnknownRiskLevel(pub String);

impl FromStr for RiskLevel {
    type Err = UnknownRiskLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(RiskLevel::Low),
            "MODERATE" | "MEDIUM" => Ok(RiskLevel::Moderate),
            "HIGH" => Ok(RiskLevel::High),
            _ => Err(UnknownRiskLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Risk level as read from an external record. Anything malformed or missing
/// becomes `Unknown`, never `Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    #[default]
    Unknown,
}

impl RiskCategory {
    pub fn parse(raw: &str) -> Self {
        raw.parse::<RiskLevel>().map_or(RiskCategory::Unknown, Self::from)
    }

    pub fn level(&self) -> Option<RiskLevel> {
        match self {
            RiskCategory::Low => Some(RiskLevel::Low),
            RiskCategory::Moderate => Some(RiskLevel::Moderate),
            RiskCategory::High => Some(RiskLevel::High),
            RiskCategory::Unknown => None,
        }
    }
}

impl From<RiskLevel> for RiskCategory {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => RiskCategory::Low,
            RiskLevel::Moderate => RiskCategory::Moderate,
            RiskLevel::High => RiskCategory::High,
        }
    }
}

impl<'de> Deserialize<'de> for RiskCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) => RiskCategory::parse(&s),
            _ => RiskCategory::Unknown,
        })
    }
}

// ── Findings ──────────────────────────────────────────────────────────────

/// Severity a single rule contributes. `Note` adds evidence without raising
/// the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Note,
    Moderate,
    High,
}

impl Severity {
    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Severity::Note => RiskLevel::Low,
            Severity::Moderate => RiskLevel::Moderate,
            Severity::High => RiskLevel::High,
        }
    }
}

/// Clinical domain of a finding. Declaration order is the evidence tie-break
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Domain {
    BloodPressure,
    Hemoglobin,
    Platelets,
    Proteinuria,
    Symptoms,
    PatientReported,
}

/// The condition a rule detected. Each maps to one recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FindingKind {
    SevereHypertension,
    Hypertension,
    BorderlineBloodPressure,
    SevereAnemia,
    ModerateAnemia,
    Thrombocytopenia,
    LowPlatelets,
    PreeclampsiaPattern,
    SignificantProteinuria,
    TraceProteinuria,
    VisualDisturbanceWithHypertension,
    ReducedFetalMovementWithHypertension,
    AnemiaWithBreathlessness,
    NeurologicalSymptomsWithHypertension,
    ProteinuriaWithNeurologicalSymptoms,
    MultiSystemInvolvement,
    SymptomsReported,
    PatientReported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Finding {
    pub kind: FindingKind,
    pub domain: Domain,
    pub severity: Severity,
    pub text: String,
}

impl Finding {
    pub fn new(kind: FindingKind, domain: Domain, severity: Severity, text: impl Into<String>) -> Self {
        Self {
            kind,
            domain,
            severity,
            text: text.into(),
        }
    }
}

// ── Assessment ────────────────────────────────────────────────────────────

/// Output of the rule engine. `findings` are ordered most severe first;
/// `recommendations` are attached by the synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
}

impl RiskAssessment {
    pub fn evidence_summary(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.text.clone()).collect()
    }

    pub fn referral_required(&self) -> bool {
        self.risk_level == RiskLevel::High
    }

    /// Append free-text symptoms the patient described. Informational only.
    pub fn note_patient_report(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.findings.push(Finding::new(
            FindingKind::PatientReported,
            Domain::PatientReported,
            Severity::Note,
            format!("Patient-reported: {text}"),
        ));
    }
}
