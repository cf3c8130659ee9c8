use std::time::Duration;

use creditrisk_core::Verdict;
use reqwest::Client;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("could not connect to the risk service at {url}")]
    Unreachable { url: String },

    #[error("risk service answered with status {status}")]
    Service { status: u16, body: Value },

    #[error("{0}")]
    Unexpected(String),
}

/// HTTP client for `POST /credit_risk`.
#[derive(Clone)]
pub struct RiskClient {
    client: Client,
    url: String,
}

impl RiskClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Unexpected(e.to_string()))?;
        Ok(Self { client, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one application record and decodes the verdict.
    pub async fn assess(&self, record: &Map<String, Value>) -> Result<Verdict, ClientError> {
        debug!(url = %self.url, "Submitting application");

        let response = self.client.post(&self.url).json(record).send().await.map_err(|e| {
            if e.is_connect() {
                warn!(url = %self.url, "Risk service unreachable");
                ClientError::Unreachable { url: self.url.clone() }
            } else {
                ClientError::Unexpected(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| ClientError::Unexpected(e.to_string()))?;
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            warn!(status = status.as_u16(), "Risk service rejected the application");
            return Err(ClientError::Service { status: status.as_u16(), body });
        }

        response
            .json::<Verdict>()
            .await
            .map_err(|e| ClientError::Unexpected(e.to_string()))
    }
}
