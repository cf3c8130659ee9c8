use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use creditrisk_core::Verdict;
use tracing::{error, info_span};
use uuid::Uuid;

use crate::error::AppError;
use crate::services::prediction;
use crate::ServerState;

/// POST /credit_risk - Assess one loan application.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<Verdict>, AppError> {
    let model = state.model().map_err(|e| {
        error!("Prediction requested but no model is loaded");
        e
    })?;

    let request_id = Uuid::new_v4();
    info_span!("credit_risk", %request_id).in_scope(|| {
        let payload = prediction::parse_body(&body)?;
        prediction::assess(model.as_ref(), state.threshold, &payload).map(Json)
    })
}
