//! Storefront import client.
//!
//! Sends the whole batch in one `POST /api/import-scraped.json` request,
//! authenticated with the shared `X-API-Key` secret. There is no retry: one
//! attempt per run, and every failure comes back as an [`UploadError`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scraper_import::{ImportClient, ImportConfig};
//!
//! let client = ImportClient::new(&ImportConfig::from_env()?)?;
//! let response = client.upload(&batch).await?;
//! println!("{} of {} imported", response.results.successful, response.results.total);
//! ```

use reqwest::StatusCode;
use std::time::Duration;

use crate::config::ImportConfig;
use crate::error::{UploadError, UploadResult};
use crate::models::{ImportBatch, ImportResponse};

/// Import endpoint, relative to the storefront base URL.
pub const IMPORT_PATH: &str = "/api/import-scraped.json";

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Storefront import client
#[derive(Clone)]
pub struct ImportClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl ImportClient {
    /// Build a client for the configured storefront.
    pub fn new(config: &ImportConfig) -> UploadResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: import_url(&config.base_url),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    /// Full URL the batch is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post the batch and decode the storefront's summary.
    ///
    /// Only an exact 200 counts as success. The reported counts are not
    /// checked against the batch size.
    pub async fn upload(&self, batch: &ImportBatch) -> UploadResult<ImportResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(batch)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if status != StatusCode::OK {
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| UploadError::Decode {
            message: e.to_string(),
            body,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> UploadError {
        if err.is_timeout() {
            UploadError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            UploadError::Transport(err.to_string())
        }
    }
}

/// Join the base URL and the import path, tolerating a trailing slash.
pub fn import_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), IMPORT_PATH)
}
