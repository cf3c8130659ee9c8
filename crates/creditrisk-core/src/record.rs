//! Validated loan applications.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::schema::{self, FEATURE_COUNT};

/// A scalar field value as decoded from JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Present but `null`; left to the model's imputers.
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Converts a JSON value; arrays and objects are not field values.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(FieldValue::Missing),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Text form used to match categorical codes.
    ///
    /// Integral numbers drop their fractional part so `1.0` matches a `"1"` category.
    pub fn as_category(&self) -> Option<String> {
        match self {
            FieldValue::Missing => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
        }
    }
}

/// Describes the JSON type of a value for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A loan application whose 31 values are stored in training order.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanApplication {
    values: Vec<FieldValue>,
}

impl LoanApplication {
    /// Validates an arbitrary JSON payload.
    pub fn from_json(payload: &Value) -> Result<Self, SchemaError> {
        match payload {
            Value::Object(map) => Self::from_map(map),
            other => Err(SchemaError::NotAnObject(json_kind(other))),
        }
    }

    /// Validates a JSON object: every schema column must be present.
    ///
    /// Keys outside the schema are ignored.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, SchemaError> {
        let missing = missing_columns(map);
        if !missing.is_empty() {
            return Err(SchemaError::MissingFields(missing));
        }

        let mut values = Vec::with_capacity(FEATURE_COUNT);
        let mut invalid = Vec::new();
        for column in schema::columns() {
            match map.get(column).and_then(FieldValue::from_json) {
                Some(value) => values.push(value),
                None => invalid.push(column.to_string()),
            }
        }

        if !invalid.is_empty() {
            return Err(SchemaError::InvalidFields(invalid));
        }
        Ok(Self { values })
    }

    /// Value of a column, if it belongs to the schema.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        schema::column_index(column).map(|idx| &self.values[idx])
    }

    /// Values in training order.
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}

/// Schema columns absent from `map`, in training order.
pub fn missing_columns(map: &Map<String, Value>) -> Vec<String> {
    schema::columns()
        .filter(|column| !map.contains_key(*column))
        .map(String::from)
        .collect()
}
