//! bridge-extract
//!
//! Turns the text of a photographed lab report (OCR output) into typed,
//! status-tagged vitals. Extraction is total: every tracked parameter ends up
//! extracted, corrected or not_found, and nothing in here returns an error.

pub mod flags;
pub mod ocr;
pub mod parser;
mod patterns;
pub mod report;

pub use parser::extract;
pub use report::Extraction;
