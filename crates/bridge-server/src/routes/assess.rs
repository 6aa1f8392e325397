use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use bridge_core::models::outcome::{AssessmentOutcome, AssessmentResult};

use crate::api::{AssessRequest, ConfirmRequest};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn assess(
    State(state): State<AppState>,
    payload: Result<Json<AssessRequest>, JsonRejection>,
) -> Result<Json<AssessmentOutcome>, ApiError> {
    let Json(request) = payload?;
    let outcome = state.pipeline.assess(request).await?;
    Ok(Json(outcome))
}

/// Finished results from the confirm flow carry the same `completed` status
/// tag as direct assessments.
pub async fn confirm(
    State(state): State<AppState>,
    payload: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Json<AssessmentOutcome>, ApiError> {
    let Json(request) = payload?;
    let result: AssessmentResult = state.pipeline.confirm(request).await?;
    Ok(Json(AssessmentOutcome::Completed(result)))
}
