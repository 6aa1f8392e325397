use jiff::Timestamp;
use tracing_subscriber::EnvFilter;

use bridge_llm::InferenceService;
use bridge_llm::gguf::GgufLoader;
use bridge_server::config::ServerConfig;
use bridge_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env();
    let inference = InferenceService::new(config.model_name.clone());

    // The server starts immediately; explanations fall back to rule-derived
    // text until the model is ready.
    match config.model_files() {
        Some((model_path, tokenizer_path)) => {
            let loader = GgufLoader::new(model_path, tokenizer_path, config.model_name.clone());
            inference.start_loading(Box::new(loader));
        }
        None => tracing::warn!(
            "BRIDGE_MODEL_PATH / BRIDGE_TOKENIZER_PATH not set, serving rule-derived explanations only"
        ),
    }

    let state = AppState::new(&config, inference);

    let tokens = state.pipeline.tokens().clone();
    let sweep_every = config.token_sweep;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            tokens.sweep(Timestamp::now()).await;
        }
    });

    let app = bridge_server::app(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "pregnancy bridge listening");
    axum::serve(listener, app).await?;
    Ok(())
}
