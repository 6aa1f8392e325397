use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::backend::{GenerationParams, ModelLoader, TextGenerator};
use crate::error::LlmError;

/// Lifecycle of the process-wide model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModelState {
    Unloaded,
    Loading,
    Ready,
    Failed { error: String },
}

impl ModelState {
    pub fn label(&self) -> &'static str {
        match self {
            ModelState::Unloaded => "unloaded",
            ModelState::Loading => "loading",
            ModelState::Ready => "ready",
            ModelState::Failed { .. } => "failed",
        }
    }
}

struct Inner {
    model_name: String,
    state: watch::Sender<ModelState>,
    model: Arc<Mutex<Option<Box<dyn TextGenerator>>>>,
}

/// Owner of the single loaded model.
///
/// Readiness is published on a watch channel and read without waiting.
/// Inference holds the model mutex for the whole call, so requests take
/// turns; each caller bounds its wait and its run with one timeout.
#[derive(Clone)]
pub struct InferenceService {
    inner: Arc<Inner>,
}

impl InferenceService {
    pub fn new(model_name: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ModelState::Unloaded);
        Self {
            inner: Arc::new(Inner {
                model_name: model_name.into(),
                state,
                model: Arc::new(Mutex::new(None)),
            }),
        }
    }

    /// A service around an already loaded generator.
    pub fn with_generator(generator: Box<dyn TextGenerator>) -> Self {
        let (state, _) = watch::channel(ModelState::Ready);
        Self {
            inner: Arc::new(Inner {
                model_name: generator.name().to_string(),
                state,
                model: Arc::new(Mutex::new(Some(generator))),
            }),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.inner.model_name
    }

    pub fn state(&self) -> ModelState {
        self.inner.state.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.inner.state.borrow(), ModelState::Ready)
    }

    pub fn subscribe(&self) -> watch::Receiver<ModelState> {
        self.inner.state.subscribe()
    }

    /// Load the model in the background. Only the first call starts a load;
    /// later calls return `None`. Must be called inside a Tokio runtime.
    pub fn start_loading(&self, loader: Box<dyn ModelLoader>) -> Option<JoinHandle<()>> {
        let claimed = self.inner.state.send_if_modified(|state| {
            if *state == ModelState::Unloaded {
                *state = ModelState::Loading;
                true
            } else {
                false
            }
        });
        if !claimed {
            warn!(state = self.state().label(), "model load already attempted");
            return None;
        }

        info!(model = %loader.model_name(), "loading model in background");
        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move {
            let started = Instant::now();
            let outcome = tokio::task::spawn_blocking(move || loader.load())
                .await
                .map_err(|e| LlmError::Join(e.to_string()))
                .and_then(|loaded| loaded);

            match outcome {
                Ok(generator) => {
                    *inner.model.lock().await = Some(generator);
                    inner.state.send_replace(ModelState::Ready);
                    info!(
                        model = %inner.model_name,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "model ready"
                    );
                }
                Err(e) => {
                    warn!(
                        model = %inner.model_name,
                        error = %e,
                        "model load failed, explanations fall back to rule-derived text"
                    );
                    inner.state.send_replace(ModelState::Failed {
                        error: e.to_string(),
                    });
                }
            }
        }))
    }

    /// Run one generation with exclusive access to the model.
    ///
    /// Fails fast with `NotReady` when no model is loaded. `limit` covers
    /// both waiting for the model and running it; on timeout a generation
    /// already under way finishes in the background and then frees the
    /// model.
    pub async fn generate(
        &self,
        prompt: String,
        params: GenerationParams,
        limit: Duration,
    ) -> Result<String, LlmError> {
        if !self.is_ready() {
            return Err(LlmError::NotReady);
        }

        let model = Arc::clone(&self.inner.model);
        let run = async move {
            let mut guard = model.lock_owned().await;
            tokio::task::spawn_blocking(move || {
                let generator = guard.as_mut().ok_or(LlmError::NotReady)?;
                generator.generate(&prompt, &params)
            })
            .await
            .map_err(|e| LlmError::Join(e.to_string()))?
        };

        tokio::time::timeout(limit, run)
            .await
            .map_err(|_| LlmError::Timeout(limit))?
    }
}
