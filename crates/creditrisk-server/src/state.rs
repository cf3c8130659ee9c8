use std::sync::Arc;

use creditrisk_config::ServiceConfig;
use creditrisk_core::{Classifier, PipelineModel, Threshold};
use tracing::{error, info};

use crate::error::AppError;

/// The model loaded once at startup, or why it could not be.
#[derive(Clone)]
pub enum ModelSlot {
    Ready(Arc<dyn Classifier>),
    Unavailable(String),
}

pub struct ServerState {
    pub model: ModelSlot,
    pub threshold: Threshold,
}

impl ServerState {
    /// Loads the artifact named by the config. A failed load is logged and
    /// leaves the service up with every prediction answering 500.
    pub fn load(config: &ServiceConfig) -> Self {
        match PipelineModel::load(&config.model_path) {
            Ok(model) => {
                let threshold = config
                    .threshold
                    .or(model.descriptor().decision_threshold)
                    .unwrap_or_default();
                info!("Decision threshold: {}", threshold);
                Self::ready(Arc::new(model), threshold)
            }
            Err(e) => {
                error!("Failed to load model from {}: {}", config.model_path.display(), e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn ready(model: Arc<dyn Classifier>, threshold: Threshold) -> Self {
        Self { model: ModelSlot::Ready(model), threshold }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            model: ModelSlot::Unavailable(reason.into()),
            threshold: Threshold::default(),
        }
    }

    /// The loaded model; every handler checks this first.
    pub fn model(&self) -> Result<&Arc<dyn Classifier>, AppError> {
        match &self.model {
            ModelSlot::Ready(model) => Ok(model),
            ModelSlot::Unavailable(reason) => Err(AppError::ModelUnavailable(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(model_path: PathBuf, threshold: Option<f64>) -> ServiceConfig {
        ServiceConfig {
            bind: "127.0.0.1:0".parse().unwrap(),
            model_path,
            threshold: threshold.map(|v| Threshold::new(v).unwrap()),
        }
    }

    fn demo_path() -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/credit_risk_model.json"))
    }

    #[test]
    fn test_artifact_threshold_used_by_default() {
        let state = ServerState::load(&config(demo_path(), None));
        assert!(state.model().is_ok());
        assert_eq!(state.threshold.value(), 0.35);
    }

    #[test]
    fn test_configured_threshold_wins() {
        let state = ServerState::load(&config(demo_path(), Some(0.5)));
        assert_eq!(state.threshold.value(), 0.5);
    }

    #[test]
    fn test_missing_artifact_leaves_model_unavailable() {
        let state = ServerState::load(&config(PathBuf::from("/nonexistent/model.json"), None));
        assert!(matches!(state.model(), Err(AppError::ModelUnavailable(_))));
    }
}
