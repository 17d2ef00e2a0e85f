//! Data models for blog posts and their processed representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleRef`]: A post discovered on the listing page
//! - [`ArticleContent`]: Fields extracted from a single post page
//! - [`SummaryBundle`]: The extractive summary computed from the body text
//! - [`EnrichedArticle`]: Everything above plus the assigned categories
//! - [`CategorizedArticles`]: The category → articles grouping handed to the renderer

use crate::analysis::categorize::Category;
use std::collections::{BTreeMap, BTreeSet};

/// A blog post as discovered on the listing page.
///
/// # Fields
///
/// * `url` - Absolute URL of the post
/// * `slug` - The site-relative path, used for deduplication
/// * `listing_title` - Anchor text of the listing link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRef {
    pub url: String,
    pub slug: String,
    pub listing_title: String,
}

/// Structured fields extracted from a post page.
///
/// Each of `title`, `published_date` and `author` is resolved through a
/// fallback chain (embedded JSON-LD first, then DOM heuristics). The date is
/// kept as the site renders it and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    /// Post headline, `"Untitled"` when nothing could be resolved.
    pub title: String,
    /// Publication date as found on the page, or empty.
    pub published_date: String,
    /// Author name, or empty.
    pub author: String,
    /// Line-structured body text; see [`crate::analysis::lines::NormalizedLine`].
    pub body_text: String,
    /// Whether any `<img>` exists on the page.
    pub has_images: bool,
    /// Whether any `<code>` or `<pre>` exists on the page.
    pub has_code: bool,
}

/// Extractive summary of one post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryBundle {
    pub summary: String,
    pub key_points: Vec<String>,
    pub data_points: Vec<String>,
    pub examples: Vec<String>,
    pub takeaways: Vec<String>,
}

/// A fully processed post, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedArticle {
    pub reference: ArticleRef,
    pub content: ArticleContent,
    /// Never empty; falls back to `{General}`.
    pub categories: BTreeSet<Category>,
    pub summary: SummaryBundle,
}

/// Articles grouped by category. A post appears once under each of its labels.
///
/// [`Category`] orders alphabetically by label, so iteration order is the
/// display order.
pub type CategorizedArticles = BTreeMap<Category, Vec<EnrichedArticle>>;

/// File every article under each of its categories, preserving input order
/// within a category.
pub fn group_by_category(articles: Vec<EnrichedArticle>) -> CategorizedArticles {
    let mut grouped = CategorizedArticles::new();
    for article in articles {
        for category in &article.categories {
            grouped.entry(*category).or_default().push(article.clone());
        }
    }
    grouped
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn article(slug: &str, title: &str, categories: &[Category]) -> EnrichedArticle {
        EnrichedArticle {
            reference: ArticleRef {
                url: format!("https://statsig.com/blog/{slug}"),
                slug: format!("/blog/{slug}"),
                listing_title: title.to_string(),
            },
            content: ArticleContent {
                title: title.to_string(),
                published_date: "2025-05-06".to_string(),
                author: "Jane Doe".to_string(),
                body_text: String::new(),
                has_images: false,
                has_code: false,
            },
            categories: categories.iter().copied().collect(),
            summary: SummaryBundle {
                summary: format!("Article about {title}"),
                ..Default::default()
            },
        }
    }
}
