//! bridge-llm
//!
//! Advisory explanations from a local quantized language model.
//!
//! The model is an application-scoped [`service::InferenceService`]: loaded
//! once in the background, used by one request at a time, and optional.
//! Whatever the model says passes through [`quality::review`] and can never
//! change the risk level; when the model is missing, slow, or wrong the
//! caller gets a rule-derived explanation instead.

pub mod backend;
pub mod error;
pub mod explain;
pub mod gguf;
pub mod prompt;
pub mod quality;
pub mod service;

pub use backend::{GenerationParams, ModelLoader, TextGenerator};
pub use explain::ExplanationGenerator;
pub use service::{InferenceService, ModelState};
