//! Blog post fetching and content extraction.
//!
//! [`extract`] turns a parsed post page into an [`ArticleContent`]. Metadata
//! comes from embedded JSON-LD when a `BlogPosting` block is present and from
//! DOM heuristics otherwise. The body is located by a prioritized list of
//! container selectors and flattened into [`NormalizedLine`]s.
//!
//! # Body Container Priority
//!
//! 1. `article`
//! 2. `[class*="blogContent"]`, `[class*="blog-content"]`, `[class*="post-content"]`, `[class*="postContent"]`
//! 3. `main`
//! 4. The grandparent of the first `<h1>`
//! 5. Every `<p>` on the page longer than 30 characters

use crate::analysis::lines::{NormalizedLine, render_lines};
use crate::models::{ArticleContent, ArticleRef};
use crate::scrapers::client::{FetchError, FetchPage};
use crate::utils::{collapse_whitespace, truncate_for_log};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use tracing::{debug, info, instrument};

static BODY_SELECTORS: Lazy<Vec<(&str, Selector)>> = Lazy::new(|| {
    [
        "article",
        r#"[class*="blogContent"]"#,
        r#"[class*="blog-content"]"#,
        r#"[class*="post-content"]"#,
        r#"[class*="postContent"]"#,
        "main",
    ]
    .into_iter()
    .map(|css| (css, Selector::parse(css).unwrap()))
    .collect()
});

const MIN_FALLBACK_PARAGRAPH_CHARS: usize = 30;

static DATE_CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)date|published").unwrap());
static AUTHOR_CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)author").unwrap());

macro_rules! selector {
    ($css:expr) => {{
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($css).unwrap());
        &*SELECTOR
    }};
}

/// The subset of a schema.org `BlogPosting` JSON-LD block we read.
#[derive(Debug, Default, Deserialize)]
struct LdBlogPosting {
    #[serde(rename = "@type")]
    kind: Option<serde_json::Value>,
    headline: Option<String>,
    #[serde(rename = "datePublished")]
    date_published: Option<String>,
    author: Option<serde_json::Value>,
}

impl LdBlogPosting {
    fn is_blog_posting(&self) -> bool {
        matches!(&self.kind, Some(serde_json::Value::String(t)) if t == "BlogPosting")
    }

    /// Only an author object carries a usable name; strings and lists are ignored.
    fn author_name(&self) -> Option<String> {
        match &self.author {
            Some(serde_json::Value::Object(obj)) => obj
                .get("name")
                .and_then(|n| n.as_str())
                .map(|n| n.trim().to_string()),
            _ => None,
        }
    }
}

/// Fetch a single post and extract its content.
///
/// An empty page still yields an article with placeholder fields; only a
/// failed fetch is an error.
#[instrument(level = "info", skip_all, fields(url = %reference.url))]
pub async fn fetch_article<F: FetchPage>(
    fetcher: &F,
    reference: &ArticleRef,
) -> Result<ArticleContent, FetchError> {
    let body = fetcher.fetch(&reference.url).await?;
    let document = Html::parse_document(&body);
    let content = extract(&document);
    info!(
        title = %content.title,
        bytes = content.body_text.len(),
        has_images = content.has_images,
        has_code = content.has_code,
        "Parsed blog post"
    );
    debug!(preview = %truncate_for_log(&content.body_text, 200), "Body preview");
    Ok(content)
}

/// Extract structured content from a parsed post page.
pub fn extract(document: &Html) -> ArticleContent {
    let ld = blog_posting(document).unwrap_or_default();

    let title = non_empty(ld.headline.clone())
        .or_else(|| first_text(document, selector!("h1")))
        .or_else(|| first_text(document, selector!("title")))
        .unwrap_or_else(|| "Untitled".to_string());

    let published_date = non_empty(ld.date_published.clone())
        .or_else(|| find_date(document))
        .unwrap_or_default();

    let author = non_empty(ld.author_name())
        .or_else(|| find_author(document))
        .unwrap_or_default();

    let body_text = match body_container(document) {
        Some(container) => render_lines(&structure_lines(container)),
        None => fallback_paragraphs(document),
    };

    ArticleContent {
        title,
        published_date,
        author,
        body_text,
        has_images: document.select(selector!("img")).next().is_some(),
        has_code: document.select(selector!("code, pre")).next().is_some(),
    }
}

/// The first `BlogPosting` among the page's JSON-LD blocks. Malformed blocks are skipped.
fn blog_posting(document: &Html) -> Option<LdBlogPosting> {
    document
        .select(selector!(r#"script[type="application/ld+json"]"#))
        .filter_map(|script| {
            let raw = script.text().collect::<String>();
            serde_json::from_str::<LdBlogPosting>(raw.trim()).ok()
        })
        .find(LdBlogPosting::is_blog_posting)
}

/// First element whose class matches the date pattern, else the first `<time>`.
fn find_date(document: &Html) -> Option<String> {
    document
        .select(selector!("[class]"))
        .find(|el| el.value().classes().any(|c| DATE_CLASS_RE.is_match(c)))
        .or_else(|| document.select(selector!("time")).next())
        .map(element_text)
}

/// First element whose class matches the author pattern, else `meta[name=author]`.
/// A `meta` match yields its `content` attribute.
fn find_author(document: &Html) -> Option<String> {
    let node = document
        .select(selector!("[class]"))
        .find(|el| el.value().classes().any(|c| AUTHOR_CLASS_RE.is_match(c)))
        .or_else(|| document.select(selector!(r#"meta[name="author"]"#)).next())?;

    if node.value().name() == "meta" {
        node.value().attr("content").map(collapse_whitespace)
    } else {
        Some(element_text(node))
    }
}

fn body_container(document: &Html) -> Option<ElementRef<'_>> {
    for (css, selector) in BODY_SELECTORS.iter() {
        if let Some(container) = document.select(selector).next() {
            debug!(selector = *css, "Found body container");
            return Some(container);
        }
    }

    let h1 = document.select(selector!("h1")).next()?;
    let grandparent = h1.parent()?.parent()?;
    let container = ElementRef::wrap(grandparent);
    if container.is_some() {
        debug!("Using h1 grandparent as body container");
    }
    container
}

/// Flatten paragraphs, `h2`–`h4` headings and list items in document order.
pub fn structure_lines(container: ElementRef<'_>) -> Vec<NormalizedLine> {
    container
        .select(selector!("p, h2, h3, h4, li"))
        .filter_map(|el| {
            let text = element_text(el);
            if text.is_empty() {
                return None;
            }
            Some(match el.value().name() {
                "h2" => NormalizedLine::Heading { level: 2, text },
                "h3" => NormalizedLine::Heading { level: 3, text },
                "h4" => NormalizedLine::Heading { level: 4, text },
                "li" => NormalizedLine::Bullet(text),
                _ => NormalizedLine::Plain(text),
            })
        })
        .collect()
}

fn fallback_paragraphs(document: &Html) -> String {
    debug!("No body container; collecting page paragraphs");
    document
        .select(selector!("p"))
        .map(element_text)
        .filter(|t| t.chars().count() > MIN_FALLBACK_PARAGRAPH_CHARS)
        .collect::<Vec<_>>()
        .join("\n")
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
