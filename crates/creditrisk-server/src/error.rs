//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use creditrisk_core::{ModelError, SchemaError};
use serde::Serialize;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// The model artifact failed to load at startup.
    ModelUnavailable(String),
    MissingFields(Vec<String>),
    InvalidFields(Vec<String>),
    BadRequest(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) | AppError::InvalidFields(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::ModelUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<SchemaError> for AppError {
    fn from(e: SchemaError) -> Self {
        match e {
            SchemaError::MissingFields(fields) => AppError::MissingFields(fields),
            SchemaError::InvalidFields(fields) => AppError::InvalidFields(fields),
            SchemaError::NotAnObject(_) => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        AppError::Internal(format!("Internal prediction error: {e}"))
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_fields: Option<Vec<String>>,
}

impl ErrorResponse {
    fn message(error: String) -> Self {
        Self { error, details: None, missing_fields: None, invalid_fields: None }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::ModelUnavailable(reason) => ErrorResponse {
                details: Some(reason),
                ..ErrorResponse::message("Model not loaded. Check the model artifact file.".into())
            },
            AppError::MissingFields(fields) => ErrorResponse {
                details: Some(format!("Missing the following columns: {}", fields.join(", "))),
                missing_fields: Some(fields),
                ..ErrorResponse::message("Incomplete or incorrect input data.".into())
            },
            AppError::InvalidFields(fields) => ErrorResponse {
                details: Some(format!("Columns must hold scalar values: {}", fields.join(", "))),
                invalid_fields: Some(fields),
                ..ErrorResponse::message("Incomplete or incorrect input data.".into())
            },
            AppError::BadRequest(message) | AppError::Internal(message) => {
                ErrorResponse::message(message)
            }
        };
        (status, Json(body)).into_response()
    }
}
