//! Header alias resolution.
//!
//! Scraper exports have used several spellings for the same column over
//! time. Each logical field has an ordered list of accepted header names;
//! the first one present in the header row wins. When the same header
//! appears more than once, its last column is used.

use crate::models::{Field, Product};

/// Accepted header spellings per field, in priority order.
pub const FIELD_ALIASES: [(Field, &[&str]); 5] = [
    (Field::Title, &["Title", "title"]),
    (Field::Asin, &["ASIN", "asin"]),
    (Field::ImageUrl, &["Image URL", "image_url", "ImageURL"]),
    (Field::Description, &["Description", "description"]),
    (Field::AffiliateUrl, &["Affiliate URL", "affiliate_url"]),
];

/// Header aliases for one field.
pub fn aliases(field: Field) -> &'static [&'static str] {
    FIELD_ALIASES
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, names)| *names)
        .unwrap_or(&[])
}

/// Column index of each logical field in a given header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: Vec<(Field, usize)>,
}

impl ColumnMap {
    /// Resolve fields against a header row. Matching is case-sensitive.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let columns = FIELD_ALIASES
            .iter()
            .filter_map(|(field, names)| {
                names
                    .iter()
                    .find_map(|name| headers.iter().rposition(|h| h.as_ref() == *name))
                    .map(|idx| (*field, idx))
            })
            .collect();
        Self { columns }
    }

    /// Column index for a field, if any alias matched.
    pub fn index_of(&self, field: Field) -> Option<usize> {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, idx)| *idx)
    }

    /// Fields with no matching header.
    pub fn unresolved(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.index_of(*f).is_none())
            .collect()
    }

    /// Build a product from row cells. Missing cells are empty text.
    pub fn product<'a, I>(&self, cells: I) -> Product
    where
        I: IntoIterator<Item = &'a str>,
    {
        let cells: Vec<&str> = cells.into_iter().collect();
        let mut product = Product::default();
        for (field, idx) in &self.columns {
            if let Some(value) = cells.get(*idx) {
                *field.slot(&mut product) = value.to_string();
            }
        }
        product
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_resolves() {
        for (field, names) in FIELD_ALIASES {
            for name in names {
                let map = ColumnMap::resolve(&["other", *name]);
                assert_eq!(map.index_of(field), Some(1), "{}", name);
            }
        }
    }

    #[test]
    fn test_first_alias_wins() {
        let map = ColumnMap::resolve(&["image_url", "ImageURL", "Image URL"]);
        assert_eq!(map.index_of(Field::ImageUrl), Some(2));

        let map = ColumnMap::resolve(&["ImageURL", "image_url"]);
        assert_eq!(map.index_of(Field::ImageUrl), Some(1));
    }

    #[test]
    fn test_duplicate_header_uses_last_column() {
        let map = ColumnMap::resolve(&["Title", "ASIN", "Title"]);
        assert_eq!(map.index_of(Field::Title), Some(2));

        let product = map.product(["Old", "B1", "New"]);
        assert_eq!(product.title, "New");
    }

    #[test]
    fn test_empty_preferred_alias_has_no_fallback() {
        let map = ColumnMap::resolve(&["Title", "title"]);
        let product = map.product(["", "Widget"]);
        assert_eq!(product.title, "");
    }

    #[test]
    fn test_case_sensitive() {
        let map = ColumnMap::resolve(&["TITLE", "Asin", "image url"]);
        assert_eq!(map.unresolved(), Field::ALL.to_vec());
    }

    #[test]
    fn test_short_row_fills_empty() {
        let map = ColumnMap::resolve(&["Title", "ASIN", "Image URL"]);
        let product = map.product(["Widget"]);
        assert_eq!(product.title, "Widget");
        assert_eq!(product.asin, "");
        assert_eq!(product.image_url, "");
    }

    #[test]
    fn test_aliases_lookup() {
        assert_eq!(aliases(Field::Asin), &["ASIN", "asin"]);
        assert_eq!(aliases(Field::ImageUrl).len(), 3);
    }
}
