//! End-to-end import run: read, validate, confirm, upload, report.
//!
//! # Example
//!
//! ```rust,ignore
//! use scraper_import::{run, Console, ImportConfig};
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ImportConfig::from_env()?;
//!     let mut console = Console::stdout();
//!     let mut input = std::io::stdin().lock();
//!     let outcome = run(Path::new("scraped.csv"), &config, &mut input, &mut console).await?;
//!     std::process::exit(outcome.exit_code());
//! }
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::ImportConfig;
use crate::error::{PipelineError, UploadError};
use crate::logs::Console;
use crate::models::{ImportBatch, ImportResponse};
use crate::parser::{read_products, ColumnMap};
use crate::upload::ImportClient;
use crate::validation::filter_valid;

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Storefront accepted the batch (its own per-product failures included).
    Uploaded(ImportResponse),
    /// User answered anything but yes.
    Cancelled,
    /// Nothing left to send after validation.
    NoValidProducts,
    /// The import request failed.
    UploadFailed(UploadError),
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Uploaded(_) | Outcome::Cancelled => 0,
            Outcome::NoValidProducts | Outcome::UploadFailed(_) => 1,
        }
    }
}

/// `y` or `yes`, any case. Only the line terminator is stripped.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim_end_matches(['\r', '\n']);
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

/// Ask a yes/no question. End of input counts as no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    console: &mut Console<W>,
    question: &str,
) -> io::Result<bool> {
    console.prompt(question)?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

/// Run the whole import for one CSV file.
///
/// Reader errors are returned; upload failures become [`Outcome::UploadFailed`].
pub async fn run<R: BufRead, W: Write>(
    csv_path: &Path,
    config: &ImportConfig,
    input: &mut R,
    console: &mut Console<W>,
) -> Result<Outcome, PipelineError> {
    console.info(format!("🔍 Reading products from {}...", csv_path.display()));

    let parsed = read_products(csv_path)?;
    console.info_indent(
        format!(
            "Encoding: {}, delimiter: '{}', rows: {}",
            parsed.encoding,
            format_delimiter(parsed.delimiter),
            parsed.products.len()
        ),
        1,
    );

    let unresolved = ColumnMap::resolve(&parsed.headers).unresolved();
    if !unresolved.is_empty() && !parsed.headers.is_empty() {
        let names: Vec<&str> = unresolved.iter().map(|f| f.key()).collect();
        console.info_indent(format!("No column found for: {}", names.join(", ")), 1);
    }

    let valid = filter_valid(parsed.products, console);

    let Some(batch) = ImportBatch::new(valid) else {
        console.error("No valid products found in CSV file");
        return Ok(Outcome::NoValidProducts);
    };

    console.info(format!("📦 Found {} valid products", batch.len()));
    let first = batch.first();
    console.info_indent(format!("First product: {} (ASIN: {})", first.title, first.asin), 1);

    console.blank();
    let question = format!("🚀 Upload {} products to web app? (y/n): ", batch.len());
    if !confirm(input, console, &question)? {
        console.error("Upload cancelled");
        return Ok(Outcome::Cancelled);
    }

    let outcome = match upload(&batch, config, console).await {
        Ok(response) => {
            report_success(&response, config, console);
            Outcome::Uploaded(response)
        }
        Err(err) => {
            report_failure(&err, console);
            Outcome::UploadFailed(err)
        }
    };

    Ok(outcome)
}

async fn upload<W: Write>(
    batch: &ImportBatch,
    config: &ImportConfig,
    console: &mut Console<W>,
) -> Result<ImportResponse, UploadError> {
    let client = ImportClient::new(config)?;
    console.info(format!("📤 Uploading {} products to web app...", batch.len()));
    client.upload(batch).await
}

fn report_success<W: Write>(response: &ImportResponse, config: &ImportConfig, console: &mut Console<W>) {
    let results = &response.results;

    console.success("Upload successful!");
    if let Some(ref message) = response.message {
        console.info_indent(message.as_str(), 1);
    }
    console.info_indent(format!("📊 Total: {}", results.total), 1);
    console.info_indent(format!("✅ Successful: {}", results.successful), 1);
    console.info_indent(format!("❌ Failed: {}", results.failed), 1);

    for detail in results.details.iter().filter(|d| d.is_error()) {
        let reason = detail.error.as_deref().unwrap_or("unknown error");
        console.info_indent(format!("{} ({}): {}", detail.title, detail.asin, reason), 2);
    }

    console.blank();
    console.info(format!("🎉 Products successfully uploaded to {}", config.base_url));
    console.info_indent("You can now view them in your storefront!", 1);
}

fn report_failure<W: Write>(err: &UploadError, console: &mut Console<W>) {
    match err {
        UploadError::Status { status, body } => {
            console.error(format!("Upload failed: {}", status));
            console.info_indent(format!("Response: {}", body), 1);
        }
        UploadError::Decode { message, body } => {
            console.error(format!("Upload failed: unexpected response ({})", message));
            console.info_indent(format!("Response: {}", body), 1);
        }
        UploadError::Timeout { .. } | UploadError::Transport(_) => {
            console.error(format!("Error uploading: {}", err));
        }
    }

    console.blank();
    console.error("Upload failed. Check your API key and internet connection.");
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::LogLevel;
    use crate::upload::IMPORT_PATH;
    use serde_json::json;
    use std::io::Write as _;
    use tempfile::NamedTempFile;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EXAMPLE_CSV: &str = "Title,ASIN,Image URL,Description,Affiliate URL\n\
        \"Widget\",\"B000123\",\"http://img/1.jpg\",\"A widget\",\"http://aff/1\"\n\
        \"Gadget\",\"\",\"http://img/2.jpg\",\"No ASIN\",\"\"\n";

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn output(console: Console<Vec<u8>>) -> String {
        String::from_utf8(console.into_inner()).unwrap()
    }

    async fn server_responding(template: ResponseTemplate, expected_calls: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(IMPORT_PATH))
            .respond_with(template)
            .expect(expected_calls)
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_affirmative_answers() {
        for yes in ["y", "Y", "yes", "YES", "Yes\n", "y\r\n"] {
            assert!(is_affirmative(yes), "{:?}", yes);
        }
        for no in ["n", "N", "", "\n", "maybe", "no", "yess", " y", "yes \n"] {
            assert!(!is_affirmative(no), "{:?}", no);
        }
    }

    #[test]
    fn test_confirm_eof_is_decline() {
        let mut console = Console::new(Vec::new());
        let mut input: &[u8] = b"";
        assert!(!confirm(&mut input, &mut console, "Go? ").unwrap());
        assert_eq!(output(console), "Go? ");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Cancelled.exit_code(), 0);
        assert_eq!(Outcome::NoValidProducts.exit_code(), 1);
        assert_eq!(
            Outcome::UploadFailed(UploadError::Transport("down".into())).exit_code(),
            1
        );
    }

    #[tokio::test]
    async fn test_successful_run() {
        let server = server_responding(
            ResponseTemplate::new(200).set_body_json(json!({
                "results": { "total": 3, "successful": 2, "failed": 1 }
            })),
            1,
        )
        .await;
        let file = csv_file(EXAMPLE_CSV);
        let config = ImportConfig::new(server.uri(), "key");
        let mut console = Console::new(Vec::new());
        let mut input: &[u8] = b"y\n";

        let outcome = run(file.path(), &config, &mut input, &mut console).await.unwrap();

        assert_eq!(outcome.exit_code(), 0);
        assert!(matches!(outcome, Outcome::Uploaded(_)));
        assert_eq!(console.count(LogLevel::Warning), 1);

        let text = output(console);
        assert!(text.contains("Found 1 valid products"));
        assert!(text.contains("First product: Widget (ASIN: B000123)"));
        assert!(text.contains("Total: 3"));
        assert!(text.contains("Successful: 2"));
        assert!(text.contains("Failed: 1"));
    }

    #[tokio::test]
    async fn test_batch_sent_to_server() {
        let server = server_responding(
            ResponseTemplate::new(200).set_body_json(json!({
                "results": { "total": 1, "successful": 1, "failed": 0 }
            })),
            1,
        )
        .await;
        let file = csv_file(EXAMPLE_CSV);
        let config = ImportConfig::new(server.uri(), "key");
        let mut console = Console::new(Vec::new());
        let mut input: &[u8] = b"YES\n";

        run(file.path(), &config, &mut input, &mut console).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["products"].as_array().unwrap().len(), 1);
        assert_eq!(body["products"][0]["asin"], "B000123");
    }

    #[tokio::test]
    async fn test_server_error_run() {
        let server = server_responding(
            ResponseTemplate::new(500).set_body_string("Internal Server Error"),
            1,
        )
        .await;
        let file = csv_file(EXAMPLE_CSV);
        let config = ImportConfig::new(server.uri(), "key");
        let mut console = Console::new(Vec::new());
        let mut input: &[u8] = b"y\n";

        let outcome = run(file.path(), &config, &mut input, &mut console).await.unwrap();

        assert_ne!(outcome.exit_code(), 0);
        let text = output(console);
        assert!(text.contains("Upload failed: 500"));
        assert!(text.contains("Response: Internal Server Error"));
    }

    #[tokio::test]
    async fn test_declined_upload_never_calls_server() {
        for answer in ["n\n", "N\n", "\n", "maybe\n"] {
            let server = server_responding(ResponseTemplate::new(200), 0).await;
            let file = csv_file(EXAMPLE_CSV);
            let config = ImportConfig::new(server.uri(), "key");
            let mut console = Console::new(Vec::new());
            let mut input: &[u8] = answer.as_bytes();

            let outcome = run(file.path(), &config, &mut input, &mut console).await.unwrap();

            assert!(matches!(outcome, Outcome::Cancelled), "{:?}", answer);
            assert_eq!(outcome.exit_code(), 0);
            assert!(output(console).contains("Upload cancelled"));
        }
    }

    #[tokio::test]
    async fn test_no_valid_products_skips_upload() {
        let server = server_responding(ResponseTemplate::new(200), 0).await;
        let file = csv_file("title,asin,image_url\nWidget,,http://img/1.jpg\n,B2,\n");
        let config = ImportConfig::new(server.uri(), "key");
        let mut console = Console::new(Vec::new());
        let mut input: &[u8] = b"y\n";

        let outcome = run(file.path(), &config, &mut input, &mut console).await.unwrap();

        assert!(matches!(outcome, Outcome::NoValidProducts));
        assert_ne!(outcome.exit_code(), 0);
        assert_eq!(console.count(LogLevel::Warning), 2);
        assert!(output(console).contains("No valid products found"));
    }

    #[tokio::test]
    async fn test_empty_file_skips_upload() {
        let server = server_responding(ResponseTemplate::new(200), 0).await;
        let file = csv_file("");
        let config = ImportConfig::new(server.uri(), "key");
        let mut console = Console::new(Vec::new());
        let mut input: &[u8] = b"y\n";

        let outcome = run(file.path(), &config, &mut input, &mut console).await.unwrap();
        assert!(matches!(outcome, Outcome::NoValidProducts));
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let config = ImportConfig::new("http://127.0.0.1:1", "key");
        let mut console = Console::new(Vec::new());
        let mut input: &[u8] = b"y\n";

        let result = run(Path::new("/no/such/export.csv"), &config, &mut input, &mut console).await;
        assert!(matches!(result, Err(PipelineError::Csv(_))));
    }

    #[tokio::test]
    async fn test_failed_details_listed() {
        let server = server_responding(
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Imported 0 of 1 products",
                "results": {
                    "total": 1, "successful": 0, "failed": 1,
                    "details": [{ "asin": "B000123", "title": "Widget", "status": "error", "error": "Airtable down" }]
                }
            })),
            1,
        )
        .await;
        let file = csv_file(EXAMPLE_CSV);
        let config = ImportConfig::new(server.uri(), "key");
        let mut console = Console::new(Vec::new());
        let mut input: &[u8] = b"y\n";

        let outcome = run(file.path(), &config, &mut input, &mut console).await.unwrap();

        assert_eq!(outcome.exit_code(), 0);
        let text = output(console);
        assert!(text.contains("Imported 0 of 1 products"));
        assert!(text.contains("Widget (B000123): Airtable down"));
    }
}
