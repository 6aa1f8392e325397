//! bridge-confirm
//!
//! The confirmation gate: decides whether extracted lab values can be used
//! as-is, parks uncertain batches behind single-use confirmation tokens, and
//! merges the health worker's confirmed values back into a complete
//! snapshot.

pub mod error;
pub mod gate;
pub mod merge;
pub mod store;
pub mod token;

pub use gate::{GateDecision, decide};
pub use store::TokenStore;
pub use token::{ConfirmationToken, PendingAssessment};
