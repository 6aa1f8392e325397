use bridge_core::error::ValidationError;
use bridge_core::models::vitals::{PartialVitals, VitalsSnapshot};

use crate::token::ConfirmationToken;

/// Overlay operator-confirmed values on the pending batch and build the
/// final snapshot.
///
/// Operator input is checked against the physiological bounds on its own
/// first, so a bad entry is reported as the operator's error. An omitted
/// value falls back to what extraction found, never to a default.
pub fn merge(token: &ConfirmationToken, operator: &PartialVitals) -> Result<VitalsSnapshot, ValidationError> {
    operator.validate()?;
    token
        .pending
        .vitals
        .overlay(operator)
        .complete(token.pending.symptoms.clone())
}
