//! The scrape → extract → categorize → summarize run.
//!
//! Posts are processed strictly one at a time with a polite pause between
//! successive article fetches. A post whose fetch fails is logged and
//! skipped; only a failed listing fetch aborts the run.

use crate::analysis::categorize::categorize;
use crate::analysis::summarize::summarize;
use crate::config::ScraperConfig;
use crate::models::{ArticleRef, CategorizedArticles, EnrichedArticle, group_by_category};
use crate::scrapers::article::fetch_article;
use crate::scrapers::client::{FetchError, FetchPage};
use crate::scrapers::listing::index_articles;
use futures::stream::{self, StreamExt};
use tokio::time::sleep;
use tracing::{error, info, instrument};

/// Index the blog, process up to `max_posts` posts and group them by category.
///
/// # Errors
///
/// Returns the listing fetch error; per-post failures are never returned.
#[instrument(level = "info", skip(fetcher, config))]
pub async fn run<F: FetchPage>(
    fetcher: &F,
    config: &ScraperConfig,
    max_posts: Option<usize>,
) -> Result<CategorizedArticles, FetchError> {
    let mut refs = index_articles(fetcher, config).await?;
    if let Some(max) = max_posts {
        refs.truncate(max);
    }

    let total = refs.len();
    let delay = config.request_delay();

    let articles: Vec<EnrichedArticle> = stream::iter(refs.into_iter().enumerate())
        .then(|(i, reference)| async move {
            if i > 0 && !delay.is_zero() {
                sleep(delay).await;
            }
            info!(n = i + 1, total, title = %reference.listing_title, "Processing post");
            process(fetcher, reference).await
        })
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(
        total,
        processed = articles.len(),
        skipped = total - articles.len(),
        "Finished processing posts"
    );

    let categorized = group_by_category(articles);
    info!(categories = categorized.len(), "Grouped posts by category");
    Ok(categorized)
}

/// Fetch, categorize and summarize one post. `None` means skip it.
async fn process<F: FetchPage>(fetcher: &F, reference: ArticleRef) -> Option<EnrichedArticle> {
    let content = match fetch_article(fetcher, &reference).await {
        Ok(content) => content,
        Err(e) => {
            error!(url = %reference.url, error = %e, "Post fetch failed; skipping");
            return None;
        }
    };

    let categories = categorize(&content.title, &content.body_text);
    let summary = summarize(&content.body_text, &content.title);
    Some(EnrichedArticle {
        reference,
        content,
        categories,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::categorize::Category;
    use crate::scrapers::testing::StaticPages;
    use std::time::Duration;

    fn config() -> ScraperConfig {
        ScraperConfig {
            request_delay_ms: 0,
            ..ScraperConfig::default()
        }
    }

    fn listing(slugs: &[(&str, &str)]) -> String {
        slugs
            .iter()
            .map(|(slug, title)| format!(r#"<a href="/blog/{slug}">{title}</a>"#))
            .collect()
    }

    #[tokio::test]
    async fn test_run_groups_and_skips_failures() {
        let pages = StaticPages::new()
            .with(
                "https://statsig.com/blog/all",
                &listing(&[
                    ("k8s", "Kubernetes flags"),
                    ("missing", "This one 404s"),
                    ("plain", "Plain old post"),
                ]),
            )
            .with(
                "https://statsig.com/blog/k8s",
                "<article><h1>Kubernetes flags</h1><p>We moved to kubernetes and every feature flag came along.</p></article>",
            )
            .with(
                "https://statsig.com/blog/plain",
                "<article><h1>Hello</h1><p>Nothing to see here.</p></article>",
            );

        let grouped = run(&pages, &config(), None).await.unwrap();

        let k8s = &grouped[&Category::EngineeringInfrastructure];
        assert_eq!(k8s.len(), 1);
        assert_eq!(k8s[0].content.title, "Kubernetes flags");
        assert_eq!(grouped[&Category::FeatureManagement], k8s.clone());

        let general = &grouped[&Category::General];
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].reference.slug, "/blog/plain");

        for (category, articles) in &grouped {
            for article in articles {
                assert!(article.categories.contains(category));
                assert_ne!(article.reference.slug, "/blog/missing");
            }
        }
    }

    #[tokio::test]
    async fn test_run_respects_max_posts() {
        let pages = StaticPages::new()
            .with(
                "https://statsig.com/blog/all",
                &listing(&[("one", "First post"), ("two", "Second post")]),
            )
            .with("https://statsig.com/blog/one", "<main><p>One.</p></main>")
            .with("https://statsig.com/blog/two", "<main><p>Two.</p></main>");

        run(&pages, &config(), Some(1)).await.unwrap();

        assert_eq!(
            *pages.requests.borrow(),
            vec![
                "https://statsig.com/blog/all".to_string(),
                "https://statsig.com/blog/one".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_page_body_is_kept() {
        let pages = StaticPages::new()
            .with(
                "https://statsig.com/blog/all",
                &listing(&[("bare", "Bare post here")]),
            )
            .with("https://statsig.com/blog/bare", "");

        let grouped = run(&pages, &config(), None).await.unwrap();
        let general = &grouped[&Category::General];
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].reference.slug, "/blog/bare");
        assert_eq!(general[0].content.title, "Untitled");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_fetches_only() {
        let pages = StaticPages::new()
            .with(
                "https://statsig.com/blog/all",
                &listing(&[("one", "First post"), ("two", "Second post")]),
            )
            .with("https://statsig.com/blog/one", "<main><p>One.</p></main>")
            .with("https://statsig.com/blog/two", "<main><p>Two.</p></main>");
        let config = ScraperConfig {
            request_delay_ms: 500,
            ..ScraperConfig::default()
        };

        let start = tokio::time::Instant::now();
        run(&pages, &config, None).await.unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(500), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(1000), "elapsed {elapsed:?}");
        assert_eq!(pages.requests.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_run_fails_without_listing() {
        let pages = StaticPages::new();
        assert!(run(&pages, &config(), None).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_extraction_keeps_placeholder_article() {
        let pages = StaticPages::new()
            .with(
                "https://statsig.com/blog/all",
                &listing(&[("bare", "Bare post here")]),
            )
            .with("https://statsig.com/blog/bare", "<div></div>");

        let grouped = run(&pages, &config(), None).await.unwrap();
        let general = &grouped[&Category::General];
        assert_eq!(general[0].content.title, "Untitled");
        assert_eq!(general[0].summary.summary, "Article about Untitled");
    }
}
