use crate::error::LlmError;

/// Stop markers local instruction-tuned models tend to run on into.
pub const DEFAULT_STOP: [&str; 6] = [
    "<end_of_turn>",
    "</s>",
    "\n\n\n",
    "Question:",
    "Patient:",
    "Your response:",
];

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub max_new_tokens: usize,
    /// Sampling is greedy (temperature 0); the seed only feeds the sampler.
    pub seed: u64,
    pub stop: Vec<String>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 256,
            seed: 42,
            stop: DEFAULT_STOP.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A loaded model that turns a prompt into text.
///
/// Implementations hold mutable decoding state (KV cache) and are never
/// called concurrently; the service serializes access.
pub trait TextGenerator: Send {
    fn name(&self) -> &str;

    fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError>;
}

/// Produces a generator. Runs once, on a blocking thread.
pub trait ModelLoader: Send + 'static {
    fn model_name(&self) -> &str;

    fn load(self: Box<Self>) -> Result<Box<dyn TextGenerator>, LlmError>;
}

/// Cut text at the first stop sequence.
pub fn truncate_at_stop<'a>(text: &'a str, stop: &[String]) -> &'a str {
    let cut = stop
        .iter()
        .filter(|s| !s.is_empty())
        .filter_map(|s| text.find(s.as_str()))
        .min()
        .unwrap_or(text.len());
    &text[..cut]
}
