//! Binary estimators operating on the encoded feature vector.

use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;

/// Fitted estimator; its raw score is the log-odds of default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    /// Additive ensemble of regression trees (gradient boosting).
    TreeEnsemble {
        base_score: f64,
        trees: Vec<Tree>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Goes to `left` when `x[feature] < threshold`, else to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

impl Tree {
    fn validate(&self, tree_idx: usize, width: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::Invalid(format!("tree {tree_idx} has no nodes")));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            let TreeNode::Split { feature, threshold, left, right } = node else {
                continue;
            };
            if *feature >= width {
                return Err(ArtifactError::Invalid(format!(
                    "tree {tree_idx} node {idx} splits on feature {feature}, encoded width is {width}"
                )));
            }
            if !threshold.is_finite() {
                return Err(ArtifactError::Invalid(format!(
                    "tree {tree_idx} node {idx} has a non-finite threshold"
                )));
            }
            // Children must point forward, which also rules out cycles.
            for child in [*left, *right] {
                if child <= idx || child >= self.nodes.len() {
                    return Err(ArtifactError::Invalid(format!(
                        "tree {tree_idx} node {idx} has invalid child {child}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { leaf } => return *leaf,
                TreeNode::Split { feature, threshold, left, right } => {
                    idx = if x[*feature] < *threshold { *left } else { *right };
                }
            }
        }
    }
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::LogisticRegression { .. } => "logistic_regression",
            Estimator::TreeEnsemble { .. } => "tree_ensemble",
        }
    }

    /// Checks the estimator against the encoded feature width.
    pub(crate) fn validate(&self, width: usize) -> Result<(), ArtifactError> {
        match self {
            Estimator::LogisticRegression { coefficients, intercept } => {
                if coefficients.len() != width {
                    return Err(ArtifactError::Invalid(format!(
                        "logistic regression has {} coefficients, encoded width is {width}",
                        coefficients.len()
                    )));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ArtifactError::Invalid("non-finite coefficient".into()));
                }
                Ok(())
            }
            Estimator::TreeEnsemble { base_score, trees } => {
                if !base_score.is_finite() {
                    return Err(ArtifactError::Invalid("non-finite base score".into()));
                }
                trees.iter().enumerate().try_for_each(|(i, tree)| tree.validate(i, width))
            }
        }
    }

    /// Raw log-odds score for an encoded row.
    pub fn decision_function(&self, x: &[f64]) -> f64 {
        match self {
            Estimator::LogisticRegression { coefficients, intercept } => {
                intercept + coefficients.iter().zip(x).map(|(w, v)| w * v).sum::<f64>()
            }
            Estimator::TreeEnsemble { base_score, trees } => {
                base_score + trees.iter().map(|t| t.evaluate(x)).sum::<f64>()
            }
        }
    }
}

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
