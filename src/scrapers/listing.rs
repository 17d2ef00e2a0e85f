//! Blog listing indexer.
//!
//! Fetches the page that links every post (`/blog/all` by default) and turns
//! its post links into [`ArticleRef`]s.
//!
//! # Link Rules
//!
//! - A post link's path is `{article_prefix}{slug}` with no further `/`
//! - The listing page itself is never a post
//! - Anchor text shorter than 6 characters is navigation noise and is dropped
//! - The first kept link for a slug wins; later duplicates are ignored

use crate::config::ScraperConfig;
use crate::models::ArticleRef;
use crate::scrapers::client::{FetchError, FetchPage};
use crate::utils::collapse_whitespace;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, instrument};
use url::Url;

const MIN_TITLE_CHARS: usize = 6;

/// Fetch the listing page and index its posts.
///
/// # Errors
///
/// Any failure to fetch the listing page is returned; the run cannot proceed
/// without it.
#[instrument(level = "info", skip_all, fields(url = %config.listing_url()))]
pub async fn index_articles<F: FetchPage>(
    fetcher: &F,
    config: &ScraperConfig,
) -> Result<Vec<ArticleRef>, FetchError> {
    let listing_url = config.listing_url();
    let html = fetcher.fetch(&listing_url).await?;
    let base_url = Url::parse(&config.base_url)?;

    let refs = parse_listing(&html, &base_url, config);
    info!(count = refs.len(), source = %listing_url, "Indexed blog posts");
    debug!(slugs = ?refs.iter().map(|r| r.slug.as_str()).collect::<Vec<_>>(), "Post slugs");
    Ok(refs)
}

/// Extract post references from listing HTML.
pub fn parse_listing(html: &str, base_url: &Url, config: &ScraperConfig) -> Vec<ArticleRef> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]").unwrap();

    let mut seen: HashSet<String> = HashSet::new();
    let mut refs = Vec::new();

    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(slug) = post_slug(href, base_url, config) else {
            continue;
        };
        if seen.contains(&slug) {
            continue;
        }

        let title = collapse_whitespace(&element.text().collect::<String>());
        if title.chars().count() < MIN_TITLE_CHARS {
            continue;
        }
        let Ok(url) = base_url.join(&slug) else {
            continue;
        };

        seen.insert(slug.clone());
        refs.push(ArticleRef {
            url: url.to_string(),
            slug,
            listing_title: title,
        });
    }
    refs
}

/// The site-relative path of `href` when it points at a post.
///
/// Relative links are taken as-is; absolute links count only when they point
/// at the configured host.
fn post_slug(href: &str, base_url: &Url, config: &ScraperConfig) -> Option<String> {
    let path = if href.starts_with('/') {
        href.split(['?', '#']).next().unwrap_or(href).to_string()
    } else {
        let absolute = Url::parse(href).ok()?;
        if absolute.host_str() != base_url.host_str() {
            return None;
        }
        absolute.path().to_string()
    };

    let slug = path.strip_prefix(&config.article_prefix)?;
    if slug.is_empty() || slug.contains('/') || path == config.listing_path {
        return None;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::StaticPages;

    fn base() -> Url {
        Url::parse("https://statsig.com").unwrap()
    }

    #[test]
    fn test_parse_listing_filters_and_dedupes() {
        let html = r#"
            <html><body>
              <a href="/blog/all">All posts</a>
              <a href="/blog/feature-flags-101">Feature flags 101</a>
              <a href="/blog/feature-flags-101">Read more about feature flags</a>
              <a href="/blog/warehouse-native">Go</a>
              <a href="/blog/warehouse-native">Warehouse native explained</a>
              <a href="/blog/category/engineering">Engineering posts</a>
              <a href="/pricing">Pricing page link</a>
              <a href="https://statsig.com/blog/absolute-post?ref=nav">Absolute link post</a>
              <a href="https://other.com/blog/elsewhere">Someone else's post</a>
            </body></html>
        "#;

        let refs = parse_listing(html, &base(), &ScraperConfig::default());

        assert_eq!(
            refs.iter().map(|r| r.slug.as_str()).collect::<Vec<_>>(),
            vec![
                "/blog/feature-flags-101",
                "/blog/warehouse-native",
                "/blog/absolute-post"
            ]
        );
        assert_eq!(refs[0].listing_title, "Feature flags 101");
        assert_eq!(refs[0].url, "https://statsig.com/blog/feature-flags-101");
        assert_eq!(refs[1].listing_title, "Warehouse native explained");
    }

    #[test]
    fn test_nested_anchor_text_is_collapsed() {
        let html = r#"<a href="/blog/x-post"><h3>Shipping   faster</h3>
            <p>with flags</p></a>"#;
        let refs = parse_listing(html, &base(), &ScraperConfig::default());
        assert_eq!(refs[0].listing_title, "Shipping faster with flags");
    }

    #[tokio::test]
    async fn test_index_articles_fetches_listing_url() {
        let pages = StaticPages::new().with(
            "https://statsig.com/blog/all",
            r#"<a href="/blog/first-post">First post title</a>"#,
        );
        let refs = index_articles(&pages, &ScraperConfig::default()).await.unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].slug, "/blog/first-post");
    }

    #[tokio::test]
    async fn test_index_articles_propagates_failure() {
        let pages = StaticPages::new();
        assert!(index_articles(&pages, &ScraperConfig::default()).await.is_err());
    }
}
