//! Quantized GGUF backend (Gemma 3 family, e.g. MedGemma 4B Q4_K_M) on
//! candle. CPU by default, Metal with the `metal` feature.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use candle_core::quantized::gguf_file;
use candle_core::{DType, Device, Tensor};
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::quantized_gemma3::ModelWeights;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::backend::{GenerationParams, ModelLoader, TextGenerator, truncate_at_stop};
use crate::error::LlmError;

pub const DEFAULT_CONTEXT_WINDOW: usize = 4096;

const END_OF_TURN: &str = "<end_of_turn>";
const EOS: &str = "<eos>";

/// Where to find the weights and tokenizer.
#[derive(Debug, Clone)]
pub struct GgufLoader {
    pub model_path: PathBuf,
    pub tokenizer_path: PathBuf,
    pub model_name: String,
    pub context_window: usize,
}

impl GgufLoader {
    pub fn new(model_path: PathBuf, tokenizer_path: PathBuf, model_name: impl Into<String>) -> Self {
        Self {
            model_path,
            tokenizer_path,
            model_name: model_name.into(),
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

fn device() -> Result<Device, LlmError> {
    #[cfg(feature = "metal")]
    {
        Ok(Device::new_metal(0)?)
    }
    #[cfg(not(feature = "metal"))]
    {
        Ok(Device::Cpu)
    }
}

impl ModelLoader for GgufLoader {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn load(self: Box<Self>) -> Result<Box<dyn TextGenerator>, LlmError> {
        let started = Instant::now();
        let device = device()?;

        let mut file = File::open(&self.model_path).map_err(|e| {
            LlmError::Load(format!("cannot open {}: {e}", self.model_path.display()))
        })?;
        let content = gguf_file::Content::read(&mut file)
            .map_err(|e| LlmError::Load(format!("invalid GGUF file: {e}")))?;
        let tensors = content.tensor_infos.len();
        let model = ModelWeights::from_gguf(content, &mut file, &device)?;

        let tokenizer = Tokenizer::from_file(&self.tokenizer_path)
            .map_err(|e| LlmError::Tokenizer(e.to_string()))?;
        let stop_ids: Vec<u32> = [END_OF_TURN, EOS]
            .iter()
            .filter_map(|t| tokenizer.token_to_id(t))
            .collect();
        if stop_ids.is_empty() {
            return Err(LlmError::Tokenizer(
                "tokenizer has no <end_of_turn> or <eos> token".to_string(),
            ));
        }

        info!(
            model = %self.model_name,
            path = %self.model_path.display(),
            tensors,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "GGUF model loaded"
        );

        Ok(Box::new(GgufGenerator {
            name: self.model_name,
            model,
            tokenizer,
            device,
            stop_ids,
            context_window: self.context_window,
        }))
    }
}

pub struct GgufGenerator {
    name: String,
    model: ModelWeights,
    tokenizer: Tokenizer,
    device: Device,
    stop_ids: Vec<u32>,
    context_window: usize,
}

impl GgufGenerator {
    fn next_token(
        &mut self,
        sampler: &mut LogitsProcessor,
        input: &[u32],
        index_pos: usize,
    ) -> Result<u32, LlmError> {
        let input = Tensor::new(input, &self.device)?.unsqueeze(0)?;
        let logits = self.model.forward(&input, index_pos)?;
        let logits = logits.squeeze(0)?.to_dtype(DType::F32)?;
        Ok(sampler.sample(&logits)?)
    }

    fn decode(&self, ids: &[u32]) -> Result<String, LlmError> {
        self.tokenizer
            .decode(ids, true)
            .map_err(|e| LlmError::Tokenizer(e.to_string()))
    }
}

impl TextGenerator for GgufGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError> {
        let started = Instant::now();
        let chat = format!("<start_of_turn>user\n{prompt}{END_OF_TURN}\n<start_of_turn>model\n");
        let prompt_ids = self
            .tokenizer
            .encode(chat, true)
            .map_err(|e| LlmError::Tokenizer(e.to_string()))?
            .get_ids()
            .to_vec();

        if prompt_ids.len() + params.max_new_tokens > self.context_window {
            return Err(LlmError::Inference(format!(
                "prompt of {} tokens does not fit the {} token context",
                prompt_ids.len(),
                self.context_window
            )));
        }

        // No temperature: argmax decoding.
        let mut sampler = LogitsProcessor::new(params.seed, None, None);
        let mut next = self.next_token(&mut sampler, &prompt_ids, 0)?;
        let mut generated: Vec<u32> = Vec::with_capacity(params.max_new_tokens);

        for step in 0..params.max_new_tokens {
            if self.stop_ids.contains(&next) {
                break;
            }
            generated.push(next);
            if !params.stop.is_empty() {
                let so_far = self.decode(&generated)?;
                if params.stop.iter().any(|s| so_far.contains(s.as_str())) {
                    break;
                }
            }
            next = self.next_token(&mut sampler, &[next], prompt_ids.len() + step)?;
        }

        let text = self.decode(&generated)?;
        debug!(
            prompt_tokens = prompt_ids.len(),
            generated_tokens = generated.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generation finished"
        );
        Ok(truncate_at_stop(&text, &params.stop).trim().to_string())
    }
}
