//! Scraper CSV reader with encoding and delimiter auto-detection.
//!
//! Turns each data row into a [`Product`], mapping header aliases onto the
//! canonical field names (see [`columns`]). No validation happens here:
//! missing values simply come out as empty text.

pub mod columns;

use csv::ReaderBuilder;
use std::path::Path;

use crate::error::CsvResult;
use crate::models::Product;

pub use columns::{aliases, ColumnMap, FIELD_ALIASES};

/// Result of reading an export, with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Products in row order
    pub products: Vec<Product>,
    /// Detected encoding
    pub encoding: String,
    /// Detected delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string, dropping a leading BOM.
///
/// Valid UTF-8 is always taken as UTF-8, whatever the detector guessed.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => match encoding.to_lowercase().as_str() {
            "iso-8859-1" | "latin-1" | "latin1" => {
                encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
            }
            "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
            _ => String::from_utf8_lossy(bytes).into_owned(),
        },
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Comma wins ties and header rows without any separator.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text into products with an explicit delimiter.
///
/// Headers and cells are taken verbatim: no whitespace trimming.
///
/// # Example
/// ```ignore
/// use scraper_import::parse_products;
///
/// let csv = "Title,ASIN,Image URL\nWidget,B000123,http://img/1.jpg";
/// let (headers, products) = parse_products(csv, ',').unwrap();
///
/// assert_eq!(headers.len(), 3);
/// assert_eq!(products[0].asin, "B000123");
/// ```
pub fn parse_products(content: &str, delimiter: char) -> CsvResult<(Vec<String>, Vec<Product>)> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = ColumnMap::resolve(&headers);

    let mut products = Vec::new();
    for record in reader.records() {
        let record = record?;
        products.push(columns.product(record.iter()));
    }

    Ok((headers, products))
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);

    let (headers, products) = parse_products(&content, delimiter)?;

    Ok(ParseResult {
        products,
        encoding,
        delimiter,
        headers,
    })
}

/// Read a scraper export from disk.
///
/// # Example
/// ```ignore
/// let result = read_products("scraped_products.csv")?;
/// println!("Delimiter: '{}', rows: {}", result.delimiter, result.products.len());
/// ```
pub fn read_products<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}
