//! Utility functions for string manipulation and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Whitespace normalization for text scraped out of HTML
//! - String truncation and slugification for logging and Markdown anchors
//! - File system validation for the output path

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Collapse every whitespace run to a single space and trim the ends.
///
/// Used for all element text so that markup indentation and `<br>` line
/// breaks never leak into extracted fields.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(collapse_whitespace("  Hello \n\t world "), "Hello world");
/// ```
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Convert a title to a URL-friendly slug.
///
/// This function is used to generate anchor links for Markdown output.
/// It lowercases the text, removes special characters, and replaces
/// spaces with hyphens.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify_title("Hello World"), "hello-world");
/// assert_eq!(slugify_title("A/B Testing & Experimentation"), "ab-testing--experimentation");
/// ```
pub fn slugify_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .replace(' ', "-")
}

/// Ensure the directory that will hold `output_file` exists and is writable.
///
/// Creates the directory if needed, then performs a write test by creating
/// and immediately deleting a probe file. Running this before scraping means
/// a bad path fails fast instead of after every post has been fetched.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %output_file.display()))]
pub async fn ensure_writable_output(output_file: &Path) -> Result<(), Box<dyn Error>> {
    let dir = match output_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).await?;

    let probe_path = dir.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Hello \n\t world "), "Hello world");
        assert_eq!(collapse_whitespace("\u{a0}nbsp\u{a0}"), "nbsp");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        assert_eq!(truncate_for_log("ééé", 2), "éé…(+2 bytes)");
    }

    #[test]
    fn test_slugify_title() {
        assert_eq!(slugify_title("Hello World"), "hello-world");
        assert_eq!(slugify_title("Test-Article!"), "test-article");
        assert_eq!(
            slugify_title("A/B Testing & Experimentation"),
            "ab-testing--experimentation"
        );
        assert_eq!(slugify_title("AI & Machine Learning"), "ai--machine-learning");
    }

    #[tokio::test]
    async fn test_ensure_writable_output_creates_parent() {
        let dir = std::env::temp_dir().join(format!("blog_digest_out_{}", std::process::id()));
        let file = dir.join("nested").join("summary.md");

        ensure_writable_output(&file).await.unwrap();
        assert!(dir.join("nested").is_dir());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_ensure_writable_output_bare_filename() {
        ensure_writable_output(Path::new("summary.md")).await.unwrap();
    }
}
