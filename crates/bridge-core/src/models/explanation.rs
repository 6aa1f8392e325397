use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

pub const FALLBACK_SOURCE: &str = "rule-derived-fallback";

/// Where an explanation came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplanationSource {
    Model(String),
    RuleDerivedFallback,
}

impl ExplanationSource {
    pub fn as_str(&self) -> &str {
        match self {
            ExplanationSource::Model(name) => name,
            ExplanationSource::RuleDerivedFallback => FALLBACK_SOURCE,
        }
    }
}

impl fmt::Display for ExplanationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ExplanationSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExplanationSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == FALLBACK_SOURCE {
            ExplanationSource::RuleDerivedFallback
        } else {
            ExplanationSource::Model(raw)
        })
    }
}

/// Advisory rationale. Deliberately has no risk-level field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Explanation {
    pub text: String,
    #[ts(type = "string")]
    pub source: ExplanationSource,
    pub qc_pass: bool,
}

impl Explanation {
    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ExplanationSource::RuleDerivedFallback,
            qc_pass: false,
        }
    }

    pub fn from_model(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ExplanationSource::Model(model.into()),
            qc_pass: true,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ExplanationSource::RuleDerivedFallback
    }
}
