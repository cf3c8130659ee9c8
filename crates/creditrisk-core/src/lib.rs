//! Domain types for credit-risk model serving.
//!
//! - [`schema`]: the 31 loan application columns in training order
//! - [`LoanApplication`]: a payload validated against the schema
//! - [`ModelArtifact`] and [`PipelineModel`]: the serialized model and its loaded form
//! - [`Classifier`]: the inference seam used by the service
//! - [`Threshold`] and [`Verdict`]: explicit decisioning over the probability of default
//!
//! # Example
//!
//! ```rust,no_run
//! use creditrisk_core::{Classifier, LoanApplication, PipelineModel, Threshold, Verdict};
//!
//! let model = PipelineModel::load("models/credit_risk_model.json")?;
//! let payload: serde_json::Value = serde_json::from_str(r#"{"Credit_Score": 750}"#)?;
//! let app = LoanApplication::from_json(&payload)?;
//! let probabilities = model.predict_proba(&app)?;
//! let verdict = Verdict::decide(probabilities, Threshold::default(), model.descriptor().label());
//! println!("{}", verdict.prediction_status);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod artifact;
pub mod decision;
pub mod error;
pub mod estimator;
pub mod model;
pub mod preprocess;
pub mod record;
pub mod schema;

pub use artifact::{ModelArtifact, FORMAT_VERSION};
pub use decision::{ClassProbabilities, InvalidThreshold, RiskClass, Threshold, Verdict, DEFAULT_THRESHOLD};
pub use error::{ArtifactError, ModelError, SchemaError};
pub use model::{Classifier, ModelDescriptor, PipelineModel};
pub use record::{FieldValue, LoanApplication};
