//! # Blog Digest
//!
//! Scrapes every post from a company blog, extracts its content, files it
//! under keyword-derived topic categories, builds an extractive summary, and
//! writes one Markdown knowledge base grouped by category.
//!
//! ## Usage
//!
//! ```sh
//! blog_digest -o statsig_blog_summary.md -m 50
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Indexing**: Discover post URLs from the blog's listing page
//! 2. **Fetching**: Download and extract each post, one at a time, with a polite delay
//! 3. **Analysis**: Categorize and summarize each post's normalized body text
//! 4. **Output**: Render and write the Markdown report

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod cli;
mod config;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::ScraperConfig;
use outputs::markdown::{self, RenderOptions};
use scrapers::client::build_fetcher;
use utils::ensure_writable_output;

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
    info!("blog_digest starting up");

    let args = Cli::parse();
    debug!(output = %args.output.display(), max_posts = ?args.max_posts, "Parsed CLI arguments");

    let config = ScraperConfig::from_env().inspect_err(|e| {
        error!(error = %e, "Failed to load configuration");
    })?;

    // Early check: fail before scraping if the report cannot be written
    if let Err(e) = ensure_writable_output(&args.output).await {
        error!(
            path = %args.output.display(),
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = build_fetcher(&config)?;
    let categorized = match pipeline::run(&fetcher, &config, args.max_posts).await {
        Ok(categorized) => categorized,
        Err(e) => {
            error!(url = %config.listing_url(), error = %e, "Could not fetch the blog listing");
            return Err(e.into());
        }
    };

    let options = RenderOptions {
        site_name: config.site_name.clone(),
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    let md = markdown::render(&categorized, &options);

    info!(path = %args.output.display(), bytes = md.len(), "Writing Markdown");
    tokio::fs::write(&args.output, md).await.inspect_err(|e| {
        error!(path = %args.output.display(), error = %e, "Failed writing Markdown");
    })?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        path = %args.output.display(),
        categories = categorized.len(),
        "Execution complete"
    );
    Ok(())
}
