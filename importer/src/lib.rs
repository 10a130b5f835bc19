//! # Scraper Import - push scraped Amazon products to the storefront
//!
//! Reads a CSV export from the product scraper, drops rows missing a title,
//! ASIN or image URL, and posts the rest to the storefront's
//! `/api/import-scraped.json` endpoint in a single request.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│ Validation  │────▶│   Upload    │
//! │ (any alias) │     │ (auto-enc)  │     │  (filter)   │     │ (one POST)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Storefront URL, API key, timeout
//! - [`models`] - Product, batch and response types
//! - [`parser`] - CSV reading and header alias resolution
//! - [`validation`] - Required-field filter
//! - [`upload`] - Storefront import client
//! - [`logs`] - Console output
//! - [`pipeline`] - The interactive import run

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Stages
pub mod parser;
pub mod upload;
pub mod validation;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ImportConfig;

pub use error::{ConfigError, CsvError, PipelineError, UploadError};

pub use logs::{Console, LogEntry, LogLevel};

pub use models::{Field, ImportBatch, ImportDetail, ImportResponse, ImportResults, Product};

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, parse_products,
    read_products, ColumnMap, ParseResult,
};

pub use validation::{filter_valid, is_valid, missing_fields, validate, RequiredField};

pub use upload::ImportClient;

pub use pipeline::{confirm, is_affirmative, run, Outcome};
