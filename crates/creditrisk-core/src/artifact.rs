//! Serialized model artifact produced by the training pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::decision::Threshold;
use crate::error::ArtifactError;
use crate::estimator::Estimator;
use crate::preprocess::Preprocessor;
use crate::schema;

/// Artifact layout version understood by this crate.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub name: String,
    pub version: String,
    /// Column order the model was trained on.
    pub features: Vec<String>,
    /// Cutoff chosen during training, if any.
    #[serde(default)]
    pub decision_threshold: Option<f64>,
    pub preprocessor: Preprocessor,
    pub estimator: Estimator,
}

impl ModelArtifact {
    /// Reads and validates an artifact file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact = serde_json::from_str(content)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: self.format_version,
                supported: FORMAT_VERSION,
            });
        }

        if !self.features.iter().map(String::as_str).eq(schema::columns()) {
            return Err(ArtifactError::Invalid(
                "feature list does not match the loan application schema".into(),
            ));
        }

        if let Some(value) = self.decision_threshold {
            Threshold::new(value).map_err(|e| ArtifactError::Invalid(e.to_string()))?;
        }

        self.preprocessor.validate()?;
        self.estimator.validate(self.preprocessor.width())
    }

    /// Threshold recommended by the artifact, if it carries a valid one.
    pub fn threshold(&self) -> Option<Threshold> {
        self.decision_threshold.and_then(|v| Threshold::new(v).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Write;

    const DEMO_ARTIFACT: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../models/credit_risk_model.json"));

    fn demo_json() -> Value {
        serde_json::from_str(DEMO_ARTIFACT).unwrap()
    }

    fn parse(value: &Value) -> Result<ModelArtifact, ArtifactError> {
        ModelArtifact::from_json_str(&value.to_string())
    }

    #[test]
    fn test_demo_artifact_is_valid() {
        let artifact = ModelArtifact::from_json_str(DEMO_ARTIFACT).unwrap();
        assert_eq!(artifact.features.len(), schema::FEATURE_COUNT);
        assert_eq!(artifact.estimator.kind(), "logistic_regression");
        assert_eq!(artifact.threshold().map(|t| t.value()), Some(0.35));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DEMO_ARTIFACT.as_bytes()).unwrap();
        let artifact = ModelArtifact::load(file.path()).unwrap();
        assert_eq!(artifact.name, "credit-risk-logit");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArtifact::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io(_)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = ModelArtifact::from_json_str("\u{80}\u{4}\u{95} not json").unwrap_err();
        assert!(matches!(err, ArtifactError::Parse(_)));
    }

    #[test]
    fn test_rejects_other_format_versions() {
        let mut json = demo_json();
        json["format_version"] = 2.into();
        let err = parse(&json).unwrap_err();
        assert!(matches!(err, ArtifactError::UnsupportedVersion { found: 2, supported: 1 }));
    }

    #[test]
    fn test_rejects_reordered_features() {
        let mut json = demo_json();
        json["features"].as_array_mut().unwrap().swap(0, 1);
        assert!(parse(&json).unwrap_err().to_string().contains("schema"));
    }

    #[test]
    fn test_rejects_width_mismatch() {
        let mut json = demo_json();
        json["estimator"]["coefficients"].as_array_mut().unwrap().pop();
        assert!(parse(&json).unwrap_err().to_string().contains("coefficients"));
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let mut json = demo_json();
        json["decision_threshold"] = 1.5.into();
        assert!(matches!(parse(&json).unwrap_err(), ArtifactError::Invalid(_)));
    }

    #[test]
    fn test_threshold_is_optional() {
        let mut json = demo_json();
        json.as_object_mut().unwrap().remove("decision_threshold");
        assert!(parse(&json).unwrap().threshold().is_none());
    }
}
