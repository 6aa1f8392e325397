//! bridge-server
//!
//! Assessment orchestrator and HTTP surface. Wires extraction, the
//! confirmation gate, the rule engine and the advisory explanation layer
//! into the direct-assessment and confirm flows.

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Router with every route, the audit middleware and permissive CORS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/v1/assess", post(routes::assess::assess))
        .route("/api/v1/confirm", post(routes::assess::confirm))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
