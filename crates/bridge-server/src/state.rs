use bridge_confirm::TokenStore;
use bridge_llm::{ExplanationGenerator, GenerationParams, InferenceService};

use crate::config::ServerConfig;
use crate::pipeline::Pipeline;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub inference: InferenceService,
}

impl AppState {
    /// State for `config` around an inference service that may still be
    /// loading (or never load).
    pub fn new(config: &ServerConfig, inference: InferenceService) -> Self {
        let params = GenerationParams {
            max_new_tokens: config.max_new_tokens,
            ..GenerationParams::default()
        };
        let explainer = ExplanationGenerator::new(inference.clone())
            .with_timeout(config.inference_timeout)
            .with_params(params);
        let tokens = TokenStore::new(config.token_ttl).with_retention(config.token_retention);

        Self {
            pipeline: Pipeline::new(tokens, explainer),
            inference,
        }
    }
}
