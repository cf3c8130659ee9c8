use creditrisk_core::ModelDescriptor;
use serde::Serialize;

/// Response for `GET /model_info`.
#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub model_used: String,
    #[serde(flatten)]
    pub descriptor: ModelDescriptor,
    pub threshold_used: f64,
}
