use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model is not loaded")]
    NotReady,

    #[error("inference timed out after {0:?}")]
    Timeout(Duration),

    #[error("model load failed: {0}")]
    Load(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("inference task failed: {0}")]
    Join(String),

    #[error("tensor error: {0}")]
    Candle(#[from] candle_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
