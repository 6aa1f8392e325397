use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

/// Closed vocabulary of danger-sign symptoms a health worker can tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Symptom {
    None,
    Headache,
    BlurredVision,
    FacialEdema,
    PedalEdema,
    Dizziness,
    Breathlessness,
    ReducedFetalMovement,
    AbdominalPain,
    NauseaVomiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SymptomCategory {
    Neurological,
    Edema,
    Respiratory,
    FetalConcern,
    Gastrointestinal,
}

impl Symptom {
    pub const ALL: [Symptom; 10] = [
        Symptom::None,
        Symptom::Headache,
        Symptom::BlurredVision,
        Symptom::FacialEdema,
        Symptom::PedalEdema,
        Symptom::Dizziness,
        Symptom::Breathlessness,
        Symptom::ReducedFetalMovement,
        Symptom::AbdominalPain,
        Symptom::NauseaVomiting,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Symptom::None => "none",
            Symptom::Headache => "headache",
            Symptom::BlurredVision => "blurred_vision",
            Symptom::FacialEdema => "facial_edema",
            Symptom::PedalEdema => "pedal_edema",
            Symptom::Dizziness => "dizziness",
            Symptom::Breathlessness => "breathlessness",
            Symptom::ReducedFetalMovement => "reduced_fetal_movement",
            Symptom::AbdominalPain => "abdominal_pain",
            Symptom::NauseaVomiting => "nausea_vomiting",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Symptom::None => "None",
            Symptom::Headache => "Headache",
            Symptom::BlurredVision => "Blurred Vision",
            Symptom::FacialEdema => "Face Swelling",
            Symptom::PedalEdema => "Foot/Leg Swelling",
            Symptom::Dizziness => "Dizziness",
            Symptom::Breathlessness => "Breathlessness",
            Symptom::ReducedFetalMovement => "Reduced Fetal Movement",
            Symptom::AbdominalPain => "Abdominal Pain",
            Symptom::NauseaVomiting => "Nausea / Vomiting",
        }
    }

    pub fn category(&self) -> Option<SymptomCategory> {
        match self {
            Symptom::None => None,
            Symptom::Headache | Symptom::BlurredVision | Symptom::Dizziness => {
                Some(SymptomCategory::Neurological)
            }
            Symptom::FacialEdema | Symptom::PedalEdema => Some(SymptomCategory::Edema),
            Symptom::Breathlessness => Some(SymptomCategory::Respiratory),
            Symptom::ReducedFetalMovement => Some(SymptomCategory::FetalConcern),
            Symptom::AbdominalPain | Symptom::NauseaVomiting => {
                Some(SymptomCategory::Gastrointestinal)
            }
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Symptom {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Symptom::ALL
            .into_iter()
            .find(|sym| sym.key() == key)
            .ok_or_else(|| ValidationError::UnknownSymptom(s.to_string()))
    }
}

/// A validated symptom set. `none` is only legal on its own; an empty set
/// and `{none}` both mean nothing was reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<Symptom>")]
pub struct SymptomSet(BTreeSet<Symptom>);

impl SymptomSet {
    pub fn new(symptoms: impl IntoIterator<Item = Symptom>) -> Result<Self, ValidationError> {
        let set: BTreeSet<Symptom> = symptoms.into_iter().collect();
        if set.contains(&Symptom::None) && set.len() > 1 {
            return Err(ValidationError::NoneWithSymptoms);
        }
        Ok(Self(set))
    }

    pub fn none() -> Self {
        Self(BTreeSet::from([Symptom::None]))
    }

    pub fn contains(&self, symptom: Symptom) -> bool {
        self.0.contains(&symptom)
    }

    /// Reported symptoms, excluding the `none` marker.
    pub fn reported(&self) -> impl Iterator<Item = Symptom> + '_ {
        self.0.iter().copied().filter(|s| *s != Symptom::None)
    }

    pub fn is_clear(&self) -> bool {
        self.reported().next().is_none()
    }

    pub fn has_category(&self, category: SymptomCategory) -> bool {
        self.reported().any(|s| s.category() == Some(category))
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.reported().map(|s| s.label()).collect()
    }

    /// Labels of the reported symptoms in one category.
    pub fn labels_in(&self, category: SymptomCategory) -> Vec<&'static str> {
        self.reported()
            .filter(|s| s.category() == Some(category))
            .map(|s| s.label())
            .collect()
    }

    /// Number of distinct categories among the reported symptoms.
    pub fn category_count(&self) -> usize {
        self.reported()
            .filter_map(|s| s.category())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl TryFrom<Vec<String>> for SymptomSet {
    type Error = ValidationError;

    fn try_from(keys: Vec<String>) -> Result<Self, Self::Error> {
        let symptoms = keys
            .iter()
            .map(|k| k.parse::<Symptom>())
            .collect::<Result<Vec<_>, _>>()?;
        SymptomSet::new(symptoms)
    }
}

impl From<SymptomSet> for Vec<Symptom> {
    fn from(set: SymptomSet) -> Self {
        set.0.into_iter().collect()
    }
}
