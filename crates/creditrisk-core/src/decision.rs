//! Threshold decisioning over the probability of default.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cutoff applied when neither configuration nor artifact provides one.
pub const DEFAULT_THRESHOLD: f64 = 0.35;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Decision threshold must be within [0, 1], got {0}")]
pub struct InvalidThreshold(pub f64);

/// Probability cutoff at or above which an application is classed as default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self, InvalidThreshold> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidThreshold(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn classify(&self, probabilities: &ClassProbabilities) -> RiskClass {
        if probabilities.default >= self.0 {
            RiskClass::Default
        } else {
            RiskClass::NoDefault
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = InvalidThreshold;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary outcome; serialized as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RiskClass {
    /// Borrower repays (low risk).
    NoDefault,
    /// Borrower defaults (high risk).
    Default,
}

impl RiskClass {
    pub fn as_u8(&self) -> u8 {
        match self {
            RiskClass::NoDefault => 0,
            RiskClass::Default => 1,
        }
    }

    /// Status label returned alongside the verdict.
    pub fn status_label(&self) -> &'static str {
        match self {
            RiskClass::NoDefault => "Low Risk (No Default)",
            RiskClass::Default => "High Risk (Default)",
        }
    }
}

impl From<RiskClass> for u8 {
    fn from(class: RiskClass) -> Self {
        class.as_u8()
    }
}

impl TryFrom<u8> for RiskClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RiskClass::NoDefault),
            1 => Ok(RiskClass::Default),
            other => Err(format!("invalid risk class {other}, expected 0 or 1")),
        }
    }
}

/// Probability of each class; the two always sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub no_default: f64,
    pub default: f64,
}

impl ClassProbabilities {
    /// Builds both probabilities from the probability of default, clamped to [0, 1].
    pub fn from_default(p_default: f64) -> Self {
        let default = p_default.clamp(0.0, 1.0);
        Self { no_default: 1.0 - default, default }
    }
}

/// JSON verdict returned by `POST /credit_risk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub predicted_class: RiskClass,
    pub probability_default: f64,
    pub probability_solvency: f64,
    pub threshold_used: f64,
    pub prediction_status: String,
    pub model_used: String,
}

impl Verdict {
    /// Applies `threshold` to the probability of default.
    pub fn decide(
        probabilities: ClassProbabilities,
        threshold: Threshold,
        model_used: impl Into<String>,
    ) -> Self {
        let predicted_class = threshold.classify(&probabilities);
        Self {
            predicted_class,
            probability_default: probabilities.default,
            probability_solvency: probabilities.no_default,
            threshold_used: threshold.value(),
            prediction_status: predicted_class.status_label().to_string(),
            model_used: model_used.into(),
        }
    }
}
