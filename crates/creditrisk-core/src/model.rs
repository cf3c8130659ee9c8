//! The classifier seam between the service and a loaded model.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::artifact::ModelArtifact;
use crate::decision::{ClassProbabilities, RiskClass, Threshold};
use crate::error::{ArtifactError, ModelError};
use crate::estimator::{sigmoid, Estimator};
use crate::preprocess::Preprocessor;
use crate::record::LoanApplication;

/// Identity and shape of a loaded model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub version: String,
    pub format_version: u32,
    pub estimator: String,
    pub features: Vec<String>,
    pub decision_threshold: Option<Threshold>,
}

impl ModelDescriptor {
    /// `name@version`, reported as `model_used`.
    pub fn label(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// A binary credit-risk classifier over single loan applications.
pub trait Classifier: Send + Sync {
    fn descriptor(&self) -> &ModelDescriptor;

    /// `[p(no default), p(default)]` for one application.
    fn predict_proba(&self, app: &LoanApplication) -> Result<ClassProbabilities, ModelError>;

    /// The model's own class at its native 0.5 boundary.
    fn predict(&self, app: &LoanApplication) -> Result<RiskClass, ModelError> {
        let probabilities = self.predict_proba(app)?;
        Ok(if probabilities.default > 0.5 { RiskClass::Default } else { RiskClass::NoDefault })
    }
}

/// Column transformer followed by an estimator, as described by a [`ModelArtifact`].
#[derive(Debug, Clone)]
pub struct PipelineModel {
    descriptor: ModelDescriptor,
    preprocessor: Preprocessor,
    estimator: Estimator,
}

impl PipelineModel {
    /// Reads, validates and prepares the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let model = Self::from_artifact(ModelArtifact::load(path)?);
        info!(
            path = %path.display(),
            model = %model.descriptor.label(),
            estimator = %model.descriptor.estimator,
            width = model.preprocessor.width(),
            "Model artifact loaded"
        );
        Ok(model)
    }

    /// Wraps an already validated artifact.
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        let decision_threshold = artifact.threshold();
        let descriptor = ModelDescriptor {
            name: artifact.name,
            version: artifact.version,
            format_version: artifact.format_version,
            estimator: artifact.estimator.kind().to_string(),
            features: artifact.features,
            decision_threshold,
        };
        Self {
            descriptor,
            preprocessor: artifact.preprocessor,
            estimator: artifact.estimator,
        }
    }
}

impl Classifier for PipelineModel {
    fn descriptor(&self) -> &ModelDescriptor {
        &self.descriptor
    }

    fn predict_proba(&self, app: &LoanApplication) -> Result<ClassProbabilities, ModelError> {
        let x = self.preprocessor.transform(app)?;
        let score = self.estimator.decision_function(&x);
        if !score.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(ClassProbabilities::from_default(sigmoid(score)))
    }
}
