//! Scraper Import CLI - upload a scraper CSV export to the storefront
//!
//! ```bash
//! scraper-import scraped_products.csv
//! ```
//!
//! Reads `STOREFRONT_URL`, `SCRAPER_API_KEY` and `IMPORT_TIMEOUT_SECS` from
//! the environment or a `.env` file.

use clap::Parser;
use scraper_import::{run, Console, ImportConfig};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scraper-import")]
#[command(version, about = "Upload scraped products from a CSV file to the storefront", long_about = None)]
struct Cli {
    /// CSV file exported by the scraper
    csv_file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let config = match ImportConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut console = Console::stdout();
    let mut input = io::stdin().lock();

    let result = run(&cli.csv_file, &config, &mut input, &mut console).await;

    if let Some(e) = console.take_error() {
        eprintln!("⚠️  Could not write to stdout: {}", e);
    }

    match result {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}
