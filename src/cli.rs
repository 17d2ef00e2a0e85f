//! Command-line interface definitions for Blog Digest.
//!
//! Site-level settings (base URL, delay, user-agent) are not flags; they come
//! from the optional YAML file named by `BLOG_DIGEST_CONFIG`.

use clap::Parser;
use std::path::PathBuf;

/// Default report path, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "statsig_blog_summary.md";

/// Command-line arguments for the Blog Digest application.
///
/// # Examples
///
/// ```sh
/// # Process every post into the default file
/// blog_digest
///
/// # First 20 posts into a custom file
/// blog_digest -o ./kb/statsig.md -m 20
/// ```
#[derive(Parser, Debug)]
#[command(version, about = "Scrape and summarize a company blog into one Markdown knowledge base")]
pub struct Cli {
    /// Output Markdown file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Maximum number of posts to process
    #[arg(short, long)]
    pub max_posts: Option<usize>,
}
