//! # Daily Health News
//!
//! A single-run job that collects the day's health headlines from NewsAPI
//! and writes them, with a tip of the day, to a JSON file for a static site
//! or app to pick up.
//!
//! ## Features
//!
//! - Tries three queries in order: an Arabic keyword search, Arabic health
//!   headlines, then English health headlines
//! - Drops articles without a title or image, and ones NewsAPI marked removed
//! - Falls back to built-in articles when there is no API key or nothing
//!   usable comes back, so a file is always produced
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... daily_health_news
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: Read flags and `NEWS_API_KEY`
//! 2. **Fetching**: Run strategies until one returns articles ([`digest`])
//! 3. **Output**: Write the bundle to `data/daily_news.json` ([`outputs::json`])

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod digest;
mod error;
mod fallback;
mod models;
mod outputs;
mod utils;

use api::NewsApiClient;
use cli::Cli;
use digest::fetch_health_news;
use outputs::json;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_health_news starting up");

    let args = Cli::parse();
    debug!(
        output_file = %args.output_file.display(),
        base_url = %args.base_url,
        max_articles = args.max_articles,
        has_api_key = args.api_key().is_some(),
        "Parsed CLI arguments"
    );

    // A client that cannot be built is treated like a missing key.
    let client = match args.api_key() {
        Some(key) => match NewsApiClient::new(&args.base_url, key, &args.user_agent) {
            Ok(client) => Some(client),
            Err(e) => {
                error!(error = %e, base_url = %args.base_url, "Could not build NewsAPI client");
                None
            }
        },
        None => None,
    };

    let bundle = fetch_health_news(client.as_ref(), args.max_articles).await;
    info!(
        article_count = bundle.articles.len(),
        updated_at = %bundle.updated_at,
        "News bundle ready"
    );

    if let Err(e) = json::write_bundle(&bundle, &args.output_file).await {
        error!(
            path = %args.output_file.display(),
            error = %e,
            "Failed to write news bundle"
        );
        return Err(e);
    }
    info!(path = %args.output_file.display(), "Successfully updated news file");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
