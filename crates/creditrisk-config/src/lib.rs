//! Configuration for the creditrisk binaries.
//!
//! Values are resolved per key, highest precedence first: process environment,
//! the JSON file named by `CREDIT_RISK_CONFIG`, built-in defaults.

use std::env;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use creditrisk_core::Threshold;
use serde::Deserialize;

pub const CONFIG_FILE_ENV: &str = "CREDIT_RISK_CONFIG";
pub const BIND_ENV: &str = "CREDIT_RISK_BIND";
pub const MODEL_PATH_ENV: &str = "CREDIT_RISK_MODEL_PATH";
pub const THRESHOLD_ENV: &str = "CREDIT_RISK_THRESHOLD";
pub const UI_BIND_ENV: &str = "CREDIT_RISK_UI_BIND";
pub const SERVICE_URL_ENV: &str = "CREDIT_RISK_SERVICE_URL";
pub const UI_LOCALE_ENV: &str = "CREDIT_RISK_UI_LOCALE";
pub const UI_TIMEOUT_ENV: &str = "CREDIT_RISK_UI_TIMEOUT_SECS";

const DEFAULT_BIND: &str = "0.0.0.0:5000";
const DEFAULT_MODEL_PATH: &str = "models/credit_risk_model.json";
const DEFAULT_UI_BIND: &str = "127.0.0.1:8501";
const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000/credit_risk";
const DEFAULT_UI_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl fmt::Display) -> Self {
        ConfigError::Invalid { key, message: message.to_string() }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Layer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceSection {
    pub bind: Option<String>,
    pub model_path: Option<PathBuf>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiSection {
    pub bind: Option<String>,
    pub service_url: Option<String>,
    pub locale: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Loads the file named by `CREDIT_RISK_CONFIG`, or an empty layer.
    pub fn discover(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(CONFIG_FILE_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}

/// Reads a process environment variable; blank values count as unset.
pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Locale
// ─────────────────────────────────────────────────────────────────────────────

/// Display language of the form UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "es-es" | "spanish" => Ok(Locale::Es),
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}' (expected 'es' or 'en')")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolved Configs
// ─────────────────────────────────────────────────────────────────────────────

/// Settings for the inference service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub model_path: PathBuf,
    /// Overrides the artifact's own threshold when set.
    pub threshold: Option<Threshold>,
}

impl ServiceConfig {
    /// Resolves from the process environment and the optional config file.
    pub fn load() -> Result<Self, ConfigError> {
        let file = FileConfig::discover(&env_lookup)?;
        Self::resolve(&file.service, env_lookup)
    }

    pub fn resolve(
        file: &ServiceSection,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind = lookup(BIND_ENV)
            .or_else(|| file.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = parse_addr(BIND_ENV, &bind)?;

        let model_path = lookup(MODEL_PATH_ENV)
            .map(PathBuf::from)
            .or_else(|| file.model_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        let threshold = match lookup(THRESHOLD_ENV) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<f64>()
                    .map_err(|e| ConfigError::invalid(THRESHOLD_ENV, e))?,
            ),
            None => file.threshold,
        };
        let threshold = threshold
            .map(Threshold::new)
            .transpose()
            .map_err(|e| ConfigError::invalid(THRESHOLD_ENV, e))?;

        Ok(Self { bind, model_path, threshold })
    }
}

/// Settings for the form UI.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    pub bind: SocketAddr,
    pub service_url: String,
    pub locale: Locale,
    pub timeout: Duration,
}

impl UiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let file = FileConfig::discover(&env_lookup)?;
        Self::resolve(&file.ui, env_lookup)
    }

    pub fn resolve(
        file: &UiSection,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind = lookup(UI_BIND_ENV)
            .or_else(|| file.bind.clone())
            .unwrap_or_else(|| DEFAULT_UI_BIND.to_string());
        let bind = parse_addr(UI_BIND_ENV, &bind)?;

        let service_url = lookup(SERVICE_URL_ENV)
            .or_else(|| file.service_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
        if !(service_url.starts_with("http://") || service_url.starts_with("https://")) {
            return Err(ConfigError::invalid(SERVICE_URL_ENV, "expected an http(s) URL"));
        }

        let locale = match lookup(UI_LOCALE_ENV).or_else(|| file.locale.clone()) {
            Some(raw) => raw.parse().map_err(|e: String| ConfigError::invalid(UI_LOCALE_ENV, e))?,
            None => Locale::default(),
        };

        let timeout_secs = match lookup(UI_TIMEOUT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid(UI_TIMEOUT_ENV, e))?,
            None => file.timeout_secs.unwrap_or(DEFAULT_UI_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            return Err(ConfigError::invalid(UI_TIMEOUT_ENV, "must be at least one second"));
        }

        Ok(Self {
            bind,
            service_url,
            locale,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_addr(key: &'static str, raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim().parse().map_err(|e| ConfigError::invalid(key, format!("'{raw}': {e}")))
}
