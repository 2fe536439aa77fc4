//! API client configuration baked in from build-time environment settings.
//!
//! SYSTEM CONTEXT
//! ==============
//! A browser bundle has no process environment at runtime, so settings are
//! read with `option_env!` when the WASM module is compiled. Parsing lives in
//! `from_values` so it can be tested without rebuilding.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
/// Shorter ceiling used by the lighter-weight call sites.
pub const SHORT_TIMEOUT_MS: u64 = 5_000;

/// Typed failures while parsing API configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API_TIMEOUT_MS: {0}")]
    Timeout(String),

    #[error("unknown API_RESPONSE_SHAPE: {0} (expected 'envelope' or 'data')")]
    ResponseShape(String),

    #[error("API_BASE_URL must start with http:// or https://: {0}")]
    BaseUrl(String),
}

/// What a successful call resolves with.
///
/// Call sites historically disagree: some read the whole envelope, others
/// only its `data` field. Both stay available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseShape {
    /// Resolve with the full `{ code, message, data }` body.
    #[default]
    Envelope,
    /// Resolve with `data` only.
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub response_shape: ResponseShape,
    pub with_credentials: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            response_shape: ResponseShape::Envelope,
            with_credentials: true,
        }
    }
}

impl ApiConfig {
    /// Build config from settings captured at compile time.
    ///
    /// Optional:
    /// - `API_BASE_URL`: default `http://localhost:8080`
    /// - `API_TIMEOUT_MS`: default 15000
    /// - `API_RESPONSE_SHAPE`: `envelope` (default) or `data`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a provided value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("API_BASE_URL"),
            option_env!("API_TIMEOUT_MS"),
            option_env!("API_RESPONSE_SHAPE"),
        )
    }

    /// Parse config from raw optional values. Empty strings count as unset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a provided value cannot be parsed.
    pub fn from_values(
        base_url: Option<&str>,
        timeout_ms: Option<&str>,
        response_shape: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(non_empty(base_url))?;
        let timeout = parse_timeout(non_empty(timeout_ms))?;
        let response_shape = parse_response_shape(non_empty(response_shape))?;
        Ok(Self { base_url, timeout, response_shape, with_credentials: true })
    }

    /// Same config with a different response shape.
    #[must_use]
    pub fn with_response_shape(mut self, shape: ResponseShape) -> Self {
        self.response_shape = shape;
        self
    }

    /// Same config with a different timeout ceiling.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join `path` onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_base_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let url = raw.unwrap_or(DEFAULT_BASE_URL);
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::BaseUrl(url.to_owned()));
    }
    Ok(url.trim_end_matches('/').to_owned())
}

fn parse_timeout(raw: Option<&str>) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_millis(DEFAULT_TIMEOUT_MS));
    };
    match raw.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::Timeout(raw.to_owned())),
    }
}

fn parse_response_shape(raw: Option<&str>) -> Result<ResponseShape, ConfigError> {
    match raw.unwrap_or("envelope") {
        "envelope" => Ok(ResponseShape::Envelope),
        "data" => Ok(ResponseShape::Data),
        other => Err(ConfigError::ResponseShape(other.to_owned())),
    }
}
