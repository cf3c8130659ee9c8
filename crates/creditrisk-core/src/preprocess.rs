//! Column transformer: turns a loan application into the model's feature vector.
//!
//! Numeric columns are imputed and standard-scaled; categorical columns are
//! imputed and one-hot encoded. The output is all numeric columns followed by
//! the categorical blocks, each in the order they are listed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ModelError};
use crate::record::{FieldValue, LoanApplication};
use crate::schema::{self, FEATURE_COUNT};

/// Imputation and scaling for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericColumn {
    pub column: String,
    /// Replacement for `null`.
    pub impute: f64,
    pub mean: f64,
    pub scale: f64,
}

impl NumericColumn {
    fn encode(&self, value: &FieldValue) -> Result<f64, ModelError> {
        let raw = match value {
            FieldValue::Missing => self.impute,
            FieldValue::Bool(b) => f64::from(u8::from(*b)),
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => {
                return Err(ModelError::NonNumeric {
                    column: self.column.clone(),
                    value: s.clone(),
                })
            }
        };
        Ok((raw - self.mean) / self.scale)
    }
}

/// Imputation and one-hot encoding for one categorical column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub column: String,
    /// Known categories, in output order.
    pub categories: Vec<String>,
    /// Replacement for `null`.
    pub impute: String,
}

impl CategoricalColumn {
    /// Writes the one-hot block; unknown categories leave it all zeros.
    fn encode_into(&self, value: &FieldValue, out: &mut Vec<f64>) {
        let key = value.as_category().unwrap_or_else(|| self.impute.clone());
        let hit = self.categories.iter().position(|c| *c == key);
        out.extend((0..self.categories.len()).map(|idx| if Some(idx) == hit { 1.0 } else { 0.0 }));
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preprocessor {
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
}

impl Preprocessor {
    /// Length of the encoded feature vector.
    pub fn width(&self) -> usize {
        self.numeric.len() + self.categorical.iter().map(|c| c.categories.len()).sum::<usize>()
    }

    /// Every schema column must be handled by exactly one transformer.
    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        let mut seen = HashSet::new();
        let listed = self
            .numeric
            .iter()
            .map(|c| c.column.as_str())
            .chain(self.categorical.iter().map(|c| c.column.as_str()));

        for column in listed {
            if schema::column_index(column).is_none() {
                return Err(invalid(format!("preprocessor column '{column}' is not in the schema")));
            }
            if !seen.insert(column) {
                return Err(invalid(format!("column '{column}' is transformed more than once")));
            }
        }

        if seen.len() != FEATURE_COUNT {
            let uncovered: Vec<&str> = schema::columns().filter(|c| !seen.contains(c)).collect();
            return Err(invalid(format!("columns without a transformer: {}", uncovered.join(", "))));
        }

        for col in &self.numeric {
            if !(col.scale.is_finite() && col.scale > 0.0) {
                return Err(invalid(format!("column '{}' has non-positive scale", col.column)));
            }
            if !(col.mean.is_finite() && col.impute.is_finite()) {
                return Err(invalid(format!("column '{}' has non-finite statistics", col.column)));
            }
        }

        for col in &self.categorical {
            if col.categories.is_empty() {
                return Err(invalid(format!("column '{}' has no categories", col.column)));
            }
        }

        Ok(())
    }

    /// Encodes a validated application.
    pub fn transform(&self, app: &LoanApplication) -> Result<Vec<f64>, ModelError> {
        let mut out = Vec::with_capacity(self.width());

        for col in &self.numeric {
            let value = lookup(app, &col.column)?;
            out.push(col.encode(value)?);
        }
        for col in &self.categorical {
            let value = lookup(app, &col.column)?;
            col.encode_into(value, &mut out);
        }

        Ok(out)
    }
}

fn lookup<'a>(app: &'a LoanApplication, column: &str) -> Result<&'a FieldValue, ModelError> {
    app.get(column).ok_or_else(|| ModelError::UnknownColumn(column.to_string()))
}

fn invalid(msg: String) -> ArtifactError {
    ArtifactError::Invalid(msg)
}
