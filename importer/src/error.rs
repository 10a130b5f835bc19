//! Error types for the scraper import pipeline.
//!
//! - [`CsvError`] - reading and parsing the scraper export
//! - [`ConfigError`] - loading [`crate::config::ImportConfig`]
//! - [`UploadError`] - the single import request
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Upload failures are not propagated through [`PipelineError`]: the driver
//! folds them into [`crate::pipeline::Outcome::UploadFailed`].

use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading the CSV export.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Structurally broken CSV.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building the import configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing API key.
    #[error("Missing {0} environment variable")]
    MissingApiKey(String),

    /// Timeout is not a positive number of seconds.
    #[error("Invalid value for {var}: '{value}' (expected a positive number of seconds)")]
    InvalidTimeout { var: String, value: String },

    /// Base URL without an http(s) scheme.
    #[error("Invalid storefront URL: '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
}

// =============================================================================
// Upload Errors
// =============================================================================

/// Why the import request failed.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Server answered with something other than 200.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// No response within the configured timeout.
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Connection, DNS or TLS failure.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// 200 response whose body is not the expected JSON.
    #[error("Invalid JSON response: {message}")]
    Decode { message: String, body: String },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Console or stdin failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;
