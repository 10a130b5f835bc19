//! Required-field checks for scraped products.
//!
//! A product is importable when `title`, `asin` and `image_url` are all
//! non-empty. Nothing else is checked: the storefront does its own
//! validation on import.
//!
//! # Example
//!
//! ```rust,ignore
//! use scraper_import::{validate, Product, RequiredField};
//!
//! let product = Product { title: "Widget".into(), ..Default::default() };
//! let missing = validate(&product).unwrap_err();
//! assert_eq!(missing, vec![RequiredField::Asin, RequiredField::ImageUrl]);
//! ```

use std::io::Write;

use crate::logs::Console;
use crate::models::{Field, Product};

/// Fields a product cannot be imported without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    Asin,
    ImageUrl,
}

impl RequiredField {
    pub const ALL: [RequiredField; 3] = [
        RequiredField::Title,
        RequiredField::Asin,
        RequiredField::ImageUrl,
    ];

    pub fn field(self) -> Field {
        match self {
            RequiredField::Title => Field::Title,
            RequiredField::Asin => Field::Asin,
            RequiredField::ImageUrl => Field::ImageUrl,
        }
    }
}

/// Required fields that are empty on `product`, in canonical order.
pub fn missing_fields(product: &Product) -> Vec<RequiredField> {
    RequiredField::ALL
        .into_iter()
        .filter(|f| f.field().get(product).is_empty())
        .collect()
}

/// `Ok(())` if importable, otherwise the missing fields.
pub fn validate(product: &Product) -> Result<(), Vec<RequiredField>> {
    let missing = missing_fields(product);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

/// Simple true/false variant of [`validate`].
pub fn is_valid(product: &Product) -> bool {
    validate(product).is_ok()
}

/// Keep importable products in order, warning once for each dropped one.
pub fn filter_valid<W: Write>(products: Vec<Product>, console: &mut Console<W>) -> Vec<Product> {
    products
        .into_iter()
        .filter(|product| match validate(product) {
            Ok(()) => true,
            Err(missing) => {
                let names: Vec<&str> = missing.iter().map(|f| f.field().key()).collect();
                console.warning(format!(
                    "Skipping product with missing {}: {}",
                    names.join(", "),
                    product
                ));
                false
            }
        })
        .collect()
}
