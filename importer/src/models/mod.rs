//! Domain models for the scraper import pipeline.
//!
//! - [`Product`] - one scraped product, keyed by canonical field names
//! - [`ImportBatch`] - the non-empty set of products sent in one request
//! - [`ImportResponse`] - what the storefront answers on success

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Product
// =============================================================================

/// One product row from the scraper export.
///
/// Serialized with the canonical keys expected by the import endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub asin: String,
    pub image_url: String,
    pub description: String,
    pub affiliate_url: String,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

// =============================================================================
// Logical Fields
// =============================================================================

/// The five logical product fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Asin,
    ImageUrl,
    Description,
    AffiliateUrl,
}

impl Field {
    /// All fields, in canonical order.
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Asin,
        Field::ImageUrl,
        Field::Description,
        Field::AffiliateUrl,
    ];

    /// Canonical JSON key.
    pub fn key(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Asin => "asin",
            Field::ImageUrl => "image_url",
            Field::Description => "description",
            Field::AffiliateUrl => "affiliate_url",
        }
    }

    /// Read the field from a product.
    pub fn get(self, product: &Product) -> &str {
        match self {
            Field::Title => &product.title,
            Field::Asin => &product.asin,
            Field::ImageUrl => &product.image_url,
            Field::Description => &product.description,
            Field::AffiliateUrl => &product.affiliate_url,
        }
    }

    /// Mutable access, used only while a product is being built from a row.
    pub(crate) fn slot(self, product: &mut Product) -> &mut String {
        match self {
            Field::Title => &mut product.title,
            Field::Asin => &mut product.asin,
            Field::ImageUrl => &mut product.image_url,
            Field::Description => &mut product.description,
            Field::AffiliateUrl => &mut product.affiliate_url,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Import Batch
// =============================================================================

/// Products sent in a single import request.
///
/// Serializes as `{"products": [...]}`. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportBatch {
    products: Vec<Product>,
}

impl ImportBatch {
    /// Build a batch, or `None` when there is nothing to send.
    pub fn new(products: Vec<Product>) -> Option<Self> {
        if products.is_empty() {
            None
        } else {
            Some(Self { products })
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// First product, shown as a preview before confirmation.
    pub fn first(&self) -> &Product {
        &self.products[0]
    }
}

// =============================================================================
// Import Response
// =============================================================================

/// Body of a successful import response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub results: ImportResults,
}

/// Counts reported by the storefront. Trusted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResults {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    #[serde(default)]
    pub details: Vec<ImportDetail>,
}

/// Per-product status returned by the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDetail {
    #[serde(default)]
    pub asin: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl ImportDetail {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}
