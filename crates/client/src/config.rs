//! Loader configuration, resolved from the environment.

use std::time::Duration;

use thiserror::Error;

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_PRODUCTS_PATH: &str = "STOREFRONT_PRODUCTS_PATH";
pub const ENV_TIMEOUT_SECS: &str = "STOREFRONT_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PRODUCTS_PATH: &str = "/api/products";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub products_path: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            products_path: DEFAULT_PRODUCTS_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup` (a stand-in for `std::env::var`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            Some(url) => config = config.with_api_url(url)?,
            None => tracing::warn!("{ENV_API_URL} not set; using {DEFAULT_API_URL}"),
        }

        if let Some(path) = lookup(ENV_PRODUCTS_PATH).filter(|v| !v.trim().is_empty()) {
            config.products_path = path.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_TIMEOUT_SECS, format!("not an integer: {raw:?}")))?;
            if secs == 0 {
                return Err(ConfigError::invalid(ENV_TIMEOUT_SECS, "must be greater than zero"));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override the base URL; must be an absolute http(s) URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        let parsed = reqwest::Url::parse(&url)
            .map_err(|e| ConfigError::invalid(ENV_API_URL, format!("{url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                ENV_API_URL,
                format!("unsupported scheme {:?}", parsed.scheme()),
            ));
        }
        self.api_url = url;
        Ok(self)
    }

    /// Full URL of the products endpoint.
    pub fn products_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            self.products_path.trim_start_matches('/')
        )
    }
}
