use axum::Json;
use axum::extract::State;
use serde::Serialize;

use bridge_llm::ModelState;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub model_loaded: bool,
    pub model: ModelStatus,
    pub safety_net: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Liveness plus model status. Always `ok`: assessments are served with the
/// rule-derived explanation while the model is unavailable.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_state = state.inference.state();
    let model = ModelStatus {
        state: model_state.label(),
        model_name: Some(state.inference.model_name().to_string()),
        error: match model_state {
            ModelState::Failed { error } => Some(error),
            _ => None,
        },
    };

    Json(HealthResponse {
        service: "pregnancy-bridge",
        status: "ok",
        model_loaded: state.inference.is_ready(),
        model,
        safety_net: "active",
    })
}
