//! Single-application credit-risk assessment.

use creditrisk_core::{Classifier, LoanApplication, Threshold, Verdict};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::AppError;

/// Parses a raw request body. The content type is not checked.
pub fn parse_body(body: &[u8]) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}

/// Validates `payload` against the schema and applies `threshold` to the
/// model's probability of default.
pub fn assess(
    model: &dyn Classifier,
    threshold: Threshold,
    payload: &Value,
) -> Result<Verdict, AppError> {
    let app = LoanApplication::from_json(payload).map_err(|e| {
        warn!("Rejected application: {}", e);
        AppError::from(e)
    })?;

    let probabilities = model.predict_proba(&app)?;
    let native_class = model.predict(&app)?;
    let verdict = Verdict::decide(probabilities, threshold, model.descriptor().label());

    if native_class != verdict.predicted_class {
        debug!(
            native_class = native_class.as_u8(),
            "Decision threshold overrides the model's own boundary"
        );
    }

    info!(
        predicted_class = verdict.predicted_class.as_u8(),
        probability_default = verdict.probability_default,
        threshold = verdict.threshold_used,
        "Prediction served"
    );
    Ok(verdict)
}
