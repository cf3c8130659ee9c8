use creditrisk_config::UiConfig;

use crate::catalog::Catalog;
use crate::client::{ClientError, RiskClient};

/// Shared state for the form handlers.
pub struct UiState {
    pub client: RiskClient,
    pub catalog: &'static Catalog,
}

impl UiState {
    pub fn new(config: &UiConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: RiskClient::new(config.service_url.clone(), config.timeout)?,
            catalog: Catalog::for_locale(config.locale),
        })
    }
}
