//! bridge-core
//!
//! Pure domain types for the maternal risk pipeline: vitals snapshots,
//! OCR extraction records, risk assessments, recommendations and the
//! payloads returned to the field worker. No I/O and no model dependency.
//! This is the shared vocabulary of every other bridge crate.

pub mod bounds;
pub mod error;
pub mod models;
