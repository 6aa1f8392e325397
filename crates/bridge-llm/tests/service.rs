use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Duration;

use bridge_llm::error::LlmError;
use bridge_llm::{GenerationParams, InferenceService, ModelLoader, ModelState, TextGenerator};

struct Scripted {
    reply: String,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl Scripted {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            delay: Duration::ZERO,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl TextGenerator for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate(&mut self, prompt: &str, _params: &GenerationParams) -> Result<String, LlmError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(format!("{} [{}]", self.reply, prompt))
    }
}

struct ScriptedLoader {
    outcome: Result<(), String>,
    release: Option<mpsc::Receiver<()>>,
}

impl ModelLoader for ScriptedLoader {
    fn model_name(&self) -> &str {
        "scripted"
    }

    fn load(self: Box<Self>) -> Result<Box<dyn TextGenerator>, LlmError> {
        let this = *self;
        if let Some(release) = this.release {
            let _ = release.recv();
        }
        match this.outcome {
            Ok(()) => Ok(Box::new(Scripted::new("ok"))),
            Err(e) => Err(LlmError::Load(e)),
        }
    }
}

#[tokio::test]
async fn generate_before_load_fails_fast() {
    let service = InferenceService::new("medgemma");
    assert_eq!(service.state(), ModelState::Unloaded);
    assert!(!service.is_ready());

    let err = service
        .generate("hi".into(), GenerationParams::default(), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::NotReady));
}

#[tokio::test]
async fn background_load_moves_through_loading_to_ready() {
    let service = InferenceService::new("medgemma");
    let (release, gate) = mpsc::channel();
    let handle = service
        .start_loading(Box::new(ScriptedLoader {
            outcome: Ok(()),
            release: Some(gate),
        }))
        .unwrap();

    assert_eq!(service.state(), ModelState::Loading);
    assert!(!service.is_ready());
    assert!(matches!(
        service
            .generate("hi".into(), GenerationParams::default(), Duration::from_secs(5))
            .await,
        Err(LlmError::NotReady)
    ));

    release.send(()).unwrap();
    handle.await.unwrap();

    assert_eq!(service.state(), ModelState::Ready);
    let out = service
        .generate("hi".into(), GenerationParams::default(), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(out, "ok [hi]");
}

#[tokio::test]
async fn load_is_started_only_once() {
    let service = InferenceService::new("medgemma");
    let first = service.start_loading(Box::new(ScriptedLoader {
        outcome: Ok(()),
        release: None,
    }));
    let second = service.start_loading(Box::new(ScriptedLoader {
        outcome: Ok(()),
        release: None,
    }));
    assert!(first.is_some());
    assert!(second.is_none());
    first.unwrap().await.unwrap();
    assert!(service.is_ready());
}

#[tokio::test]
async fn failed_load_is_reported_and_never_ready() {
    let service = InferenceService::new("medgemma");
    let mut states = service.subscribe();
    service
        .start_loading(Box::new(ScriptedLoader {
            outcome: Err("weights missing".into()),
            release: None,
        }))
        .unwrap()
        .await
        .unwrap();

    let state = states
        .wait_for(|s| matches!(s, ModelState::Failed { .. }))
        .await
        .unwrap()
        .clone();
    match state {
        ModelState::Failed { error } => assert!(error.contains("weights missing")),
        other => panic!("unexpected state {other:?}"),
    }
    assert!(!service.is_ready());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_generations_take_turns() {
    let mut generator = Scripted::new("ok");
    generator.delay = Duration::from_millis(20);
    let max_in_flight = Arc::clone(&generator.max_in_flight);
    let service = InferenceService::with_generator(Box::new(generator));

    let mut tasks = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            service
                .generate(format!("p{i}"), GenerationParams::default(), Duration::from_secs(10))
                .await
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap().is_ok());
    }
    assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn slow_generation_times_out() {
    let mut generator = Scripted::new("ok");
    generator.delay = Duration::from_millis(500);
    let service = InferenceService::with_generator(Box::new(generator));

    let err = service
        .generate("hi".into(), GenerationParams::default(), Duration::from_millis(20))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Timeout(_)));
}

#[test]
fn model_state_serializes_with_state_tag() {
    let ready = serde_json::to_value(ModelState::Ready).unwrap();
    assert_eq!(ready, serde_json::json!({ "state": "ready" }));

    let failed = serde_json::to_value(ModelState::Failed {
        error: "boom".into(),
    })
    .unwrap();
    assert_eq!(failed, serde_json::json!({ "state": "failed", "error": "boom" }));
}
