//! Scraper configuration.
//!
//! All site-specific values (base URL, paths, request headers, politeness
//! delay) live in [`ScraperConfig`] and are passed explicitly to the HTTP
//! client and scrapers. Defaults target the Statsig blog. An optional YAML
//! file named by the `BLOG_DIGEST_CONFIG` environment variable overrides any
//! subset of fields.
//!
//! ```yaml
//! base_url: https://statsig.com
//! request_delay_ms: 1000
//! ```

use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Environment variable holding the path of an optional YAML config file.
pub const CONFIG_ENV_VAR: &str = "BLOG_DIGEST_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Scheme and host of the site, without a trailing slash.
    pub base_url: String,
    /// Human-readable site name used in the report heading.
    pub site_name: String,
    /// Path of the page listing every post.
    pub listing_path: String,
    /// Path prefix shared by post URLs; links are `{prefix}{slug}` with no further `/`.
    pub article_prefix: String,
    pub user_agent: String,
    /// Pause between successive article fetches.
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
    /// Retries after the first failed attempt of a retriable request.
    pub max_retries: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://statsig.com".to_string(),
            site_name: "Statsig".to_string(),
            listing_path: "/blog/all".to_string(),
            article_prefix: "/blog/".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
                .to_string(),
            request_delay_ms: 500,
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

impl ScraperConfig {
    /// Parse a YAML document; missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from `path`, or return the defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&yaml)?;
        info!(path = %path.display(), base_url = %config.base_url, "Loaded configuration");
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], if set.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let path = std::env::var_os(CONFIG_ENV_VAR);
        Self::load(path.as_deref().map(Path::new))
    }

    pub fn listing_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.listing_path)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.listing_url(), "https://statsig.com/blog/all");
        assert_eq!(config.request_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ScraperConfig::from_yaml(
            "base_url: https://example.com/\nrequest_delay_ms: 0\n",
        )
        .unwrap();
        assert_eq!(config.listing_url(), "https://example.com/blog/all");
        assert_eq!(config.request_delay(), Duration::ZERO);
        assert_eq!(config.site_name, "Statsig");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(ScraperConfig::from_yaml("request_delay_ms: soon").is_err());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(ScraperConfig::load(None).unwrap(), ScraperConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("blog_digest_missing_config.yaml");
        assert!(ScraperConfig::load(Some(&path)).is_err());
    }
}
