//! Import configuration.
//!
//! Loaded from the process environment; `main` loads a `.env` file first
//! with `dotenvy`, so either source works.
//!
//! | Variable              | Default                                                    |
//! |-----------------------|------------------------------------------------------------|
//! | `STOREFRONT_URL`      | `https://true-essentials-affiliate-storefront.vercel.app`  |
//! | `SCRAPER_API_KEY`     | required                                                   |
//! | `IMPORT_TIMEOUT_SECS` | `60`                                                       |

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Storefront base URL variable.
pub const BASE_URL_VAR: &str = "STOREFRONT_URL";

/// Shared secret variable, sent as `X-API-Key`.
pub const API_KEY_VAR: &str = "SCRAPER_API_KEY";

/// Request timeout variable, in seconds.
pub const TIMEOUT_VAR: &str = "IMPORT_TIMEOUT_SECS";

/// Default storefront deployment.
pub const DEFAULT_BASE_URL: &str = "https://true-essentials-affiliate-storefront.vercel.app";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where and how to send the import request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ImportConfig {
    /// Create a config with the default timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let api_key = get(API_KEY_VAR)
            .ok_or_else(|| ConfigError::MissingApiKey(API_KEY_VAR.to_string()))?;

        let timeout_secs = match get(TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: TIMEOUT_VAR.to_string(),
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
