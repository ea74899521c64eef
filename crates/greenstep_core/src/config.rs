//! Catalog service configuration.
//!
//! # Responsibility
//! - Hold simulated latency, failure-injection and QR endpoint settings.
//! - Validate overrides loaded from JSON before they reach the service.
//!
//! # Invariants
//! - `failure_rate` is within `0.0..=1.0`.
//! - `app_origin` and `qr_endpoint` are absolute `http(s)` URLs.
//! - QR colors are 6-digit hex without a leading `#`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use url::Url;

pub const DEFAULT_LIST_DELAY_MS: u64 = 800;
pub const DEFAULT_LOOKUP_DELAY_MS: u64 = 300;
pub const DEFAULT_FAILURE_RATE: f64 = 0.05;
pub const DEFAULT_APP_ORIGIN: &str = "https://greenstep-app.com";
pub const DEFAULT_QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const DEFAULT_QR_SIZE: &str = "200x200";
pub const DEFAULT_QR_BACKGROUND: &str = "f0f9f0";
pub const DEFAULT_QR_FOREGROUND: &str = "2d5a2d";

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{6}$").expect("valid hex color regex"));
static QR_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9][0-9]{0,3}x[1-9][0-9]{0,3}$").expect("valid size regex"));

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration parse/validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON could not be decoded into `CatalogConfig`.
    Parse(String),
    InvalidUrl {
        field: &'static str,
        value: String,
        message: String,
    },
    InvalidColor {
        field: &'static str,
        value: String,
    },
    InvalidSize(String),
    InvalidFailureRate(f64),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid catalog config: {message}"),
            Self::InvalidUrl {
                field,
                value,
                message,
            } => write!(f, "`{field}` is not a valid http(s) URL `{value}`: {message}"),
            Self::InvalidColor { field, value } => {
                write!(f, "`{field}` must be a 6-digit hex color, got `{value}`")
            }
            Self::InvalidSize(value) => {
                write!(f, "`qrSize` must look like `200x200`, got `{value}`")
            }
            Self::InvalidFailureRate(value) => {
                write!(f, "`failureRate` must be within 0.0..=1.0, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings for `CatalogService`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Simulated latency of "list all trees".
    pub list_delay_ms: u64,
    /// Simulated latency of "fetch one tree".
    pub lookup_delay_ms: u64,
    /// Independent per-call probability of an injected list failure.
    pub failure_rate: f64,
    /// Origin embedded in deep links (`<origin>/tree/<id>`).
    pub app_origin: String,
    /// Third-party QR image renderer base URL.
    pub qr_endpoint: String,
    pub qr_size: String,
    pub qr_background: String,
    pub qr_foreground: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            list_delay_ms: DEFAULT_LIST_DELAY_MS,
            lookup_delay_ms: DEFAULT_LOOKUP_DELAY_MS,
            failure_rate: DEFAULT_FAILURE_RATE,
            app_origin: DEFAULT_APP_ORIGIN.to_string(),
            qr_endpoint: DEFAULT_QR_ENDPOINT.to_string(),
            qr_size: DEFAULT_QR_SIZE.to_string(),
            qr_background: DEFAULT_QR_BACKGROUND.to_string(),
            qr_foreground: DEFAULT_QR_FOREGROUND.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Parses a JSON override document; missing fields keep their defaults.
    ///
    /// # Errors
    /// - `Parse` for malformed JSON or unknown fields.
    /// - Any `validate()` error.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let mut config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.app_origin = config.app_origin.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Validates all fields.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(ConfigError::InvalidFailureRate(self.failure_rate));
        }
        validate_http_url("appOrigin", &self.app_origin)?;
        validate_http_url("qrEndpoint", &self.qr_endpoint)?;
        if !QR_SIZE_RE.is_match(&self.qr_size) {
            return Err(ConfigError::InvalidSize(self.qr_size.clone()));
        }
        validate_color("qrBackground", &self.qr_background)?;
        validate_color("qrForeground", &self.qr_foreground)?;
        Ok(())
    }

    pub fn list_delay(&self) -> Duration {
        Duration::from_millis(self.list_delay_ms)
    }

    pub fn lookup_delay(&self) -> Duration {
        Duration::from_millis(self.lookup_delay_ms)
    }

    /// Zero-latency variant of this config.
    pub fn without_latency(mut self) -> Self {
        self.list_delay_ms = 0;
        self.lookup_delay_ms = 0;
        self
    }
}

fn validate_http_url(field: &'static str, value: &str) -> ConfigResult<()> {
    let parsed = Url::parse(value).map_err(|err| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        message: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            message: format!("unsupported scheme `{}`", parsed.scheme()),
        });
    }
    Ok(())
}

fn validate_color(field: &'static str, value: &str) -> ConfigResult<()> {
    if HEX_COLOR_RE.is_match(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidColor {
            field,
            value: value.to_string(),
        })
    }
}
