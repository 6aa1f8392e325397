use serde::Serialize;

use bridge_core::models::field::{ExtractedField, ExtractedValues, Flag, FlagSeverity, LabField};
use bridge_core::models::vitals::PartialVitals;

/// One extraction batch: a record per tracked field plus the flags raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    fields: Vec<ExtractedField>,
    flags: Vec<Flag>,
}

impl Extraction {
    pub(crate) fn new(fields: Vec<ExtractedField>, flags: Vec<Flag>) -> Self {
        Self { fields, flags }
    }

    /// A batch built purely from values the health worker typed in.
    pub fn from_manual(manual: &PartialVitals) -> Self {
        Self::new(
            LabField::ALL
                .iter()
                .map(|f| ExtractedField::not_found(*f))
                .collect(),
            Vec::new(),
        )
        .with_manual(manual)
    }

    /// Replace fields with manually entered values. Flags raised on the
    /// replaced OCR readings no longer apply and are dropped.
    pub fn with_manual(mut self, manual: &PartialVitals) -> Self {
        for (field, value) in manual.present() {
            if let Some(slot) = self.fields.iter_mut().find(|f| f.field == field) {
                *slot = ExtractedField::manual(field, value);
            }
            self.flags.retain(|flag| flag.field != field);
        }
        self
    }

    pub fn fields(&self) -> &[ExtractedField] {
        &self.fields
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn field(&self, field: LabField) -> Option<&ExtractedField> {
        self.fields.iter().find(|f| f.field == field)
    }

    pub fn is_missing(&self, field: LabField) -> bool {
        self.field(field).is_none_or(|f| !f.is_found())
    }

    pub fn has_critical_flags(&self) -> bool {
        self.flags.iter().any(Flag::is_critical)
    }

    pub fn has_notices(&self) -> bool {
        self.flags.iter().any(|f| f.severity == FlagSeverity::Notice)
    }

    pub fn partial(&self) -> PartialVitals {
        PartialVitals::from_fields(&self.fields)
    }

    pub fn values(&self) -> ExtractedValues {
        ExtractedValues::from_fields(&self.fields)
    }
}
