use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::ModelInfoResponse;
use crate::error::AppError;
use crate::ServerState;

/// GET /model_info - Describe the loaded model and the threshold in use.
pub async fn info(State(state): State<Arc<ServerState>>) -> Result<Json<ModelInfoResponse>, AppError> {
    let model = state.model()?;
    let descriptor = model.descriptor().clone();

    Ok(Json(ModelInfoResponse {
        model_used: descriptor.label(),
        descriptor,
        threshold_used: state.threshold.value(),
    }))
}
