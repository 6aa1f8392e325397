use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Semi-quantitative urine protein dipstick grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[ts(export)]
pub enum Proteinuria {
    #[default]
    #[serde(rename = "nil")]
    Nil,
    #[serde(rename = "+1")]
    Plus1,
    #[serde(rename = "+2")]
    Plus2,
    #[serde(rename = "+3")]
    Plus3,
}

impl Proteinuria {
    pub fn grade(&self) -> u8 {
        match self {
            Proteinuria::Nil => 0,
            Proteinuria::Plus1 => 1,
            Proteinuria::Plus2 => 2,
            Proteinuria::Plus3 => 3,
        }
    }

    pub fn from_grade(grade: u8) -> Option<Self> {
        match grade {
            0 => Some(Proteinuria::Nil),
            1 => Some(Proteinuria::Plus1),
            2 => Some(Proteinuria::Plus2),
            3 => Some(Proteinuria::Plus3),
            _ => None,
        }
    }

    /// Grade carried as a numeric extraction value.
    pub fn from_grade_value(value: f64) -> Option<Self> {
        if value.fract() != 0.0 || !(0.0..=3.0).contains(&value) {
            return None;
        }
        Self::from_grade(value as u8)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Proteinuria::Nil => "nil",
            Proteinuria::Plus1 => "+1",
            Proteinuria::Plus2 => "+2",
            Proteinuria::Plus3 => "+3",
        }
    }
}

impl fmt::Display for Proteinuria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised proteinuria grade {0:?}")]
pub struct UnknownGrade(pub String);

impl FromStr for Proteinuria {
    type Err = UnknownGrade;

    /// Accepts the spellings seen on dipstick reports: `nil`, `negative`,
    /// `trace`, `+`, `++`, `+++`, `1+`, `+2`, `3+`. Trace reads as +1 and
    /// anything above +3 is capped at +3.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        match norm.as_str() {
            "nil" | "negative" | "neg" | "none" | "absent" | "0" | "-" => {
                return Ok(Proteinuria::Nil);
            }
            "trace" | "tr" => return Ok(Proteinuria::Plus1),
            _ => {}
        }

        if !norm.is_empty() && norm.chars().all(|c| c == '+') {
            return Ok(grade_capped(norm.len()));
        }

        let digits = norm.trim_matches('+');
        if norm.contains('+')
            && let Ok(n) = digits.parse::<usize>()
            && n > 0
        {
            return Ok(grade_capped(n));
        }

        Err(UnknownGrade(s.to_string()))
    }
}

fn grade_capped(n: usize) -> Proteinuria {
    match n {
        0 => Proteinuria::Nil,
        1 => Proteinuria::Plus1,
        2 => Proteinuria::Plus2,
        _ => Proteinuria::Plus3,
    }
}

impl<'de> Deserialize<'de> for Proteinuria {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
