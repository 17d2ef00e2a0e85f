//! Markdown report generation.
//!
//! Renders the category → articles grouping into one document meant to be
//! pasted into an AI assistant's context window.
//!
//! # Layout
//!
//! ```text
//! # {Site} Blog Posts - Categorized & Summarized
//! ## Table of Contents
//! ## {Category}            (alphabetical)
//! ### {n}. {Title}         (listing order)
//! ## Instructions for AI Assistant
//! ```
//!
//! Empty sections (no data points, no author, ...) are omitted.

use crate::models::{CategorizedArticles, EnrichedArticle};
use crate::utils::slugify_title;
use itertools::Itertools;
use std::fmt::Write;

/// Values the report needs that do not come from the articles themselves.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub site_name: String,
    /// Pre-formatted timestamp, e.g. `2025-05-06 20:30:00`.
    pub generated_at: String,
}

/// Render the full report.
pub fn render(categorized: &CategorizedArticles, options: &RenderOptions) -> String {
    let mut md = String::new();
    let total = categorized
        .values()
        .flatten()
        .unique_by(|a| a.reference.url.clone())
        .count();

    writeln!(md, "# {} Blog Posts - Categorized & Summarized\n", options.site_name).unwrap();
    writeln!(md, "*Generated on: {}*\n", options.generated_at).unwrap();
    writeln!(md, "*Total Posts: {total}*\n").unwrap();
    writeln!(md, "---\n").unwrap();

    writeln!(md, "## Table of Contents\n").unwrap();
    for category in categorized.keys() {
        writeln!(md, "- [{}](#{})", category, slugify_title(category.label())).unwrap();
    }
    writeln!(md, "\n---").unwrap();

    for (category, articles) in categorized {
        writeln!(md, "\n## {category}\n").unwrap();
        writeln!(md, "*{} posts*", articles.len()).unwrap();
        for (i, article) in articles.iter().enumerate() {
            write_article(&mut md, i + 1, article);
        }
    }

    write_instructions(&mut md, categorized, options);
    md
}

fn write_article(md: &mut String, index: usize, article: &EnrichedArticle) {
    let content = &article.content;
    let summary = &article.summary;

    writeln!(md, "\n### {}. {}\n", index, content.title).unwrap();
    if !content.published_date.is_empty() {
        writeln!(md, "**Date:** {}  ", content.published_date).unwrap();
    }
    if !content.author.is_empty() {
        writeln!(md, "**Author:** {}  ", content.author).unwrap();
    }
    writeln!(md, "**URL:** {}  ", article.reference.url).unwrap();
    writeln!(
        md,
        "**Categories:** {}",
        article.categories.iter().map(|c| c.label()).join(", ")
    )
    .unwrap();

    let media = [(content.has_images, "images"), (content.has_code, "code samples")]
        .into_iter()
        .filter_map(|(present, label)| present.then_some(label))
        .join(", ");
    if !media.is_empty() {
        writeln!(md, "**Contains:** {media}").unwrap();
    }

    writeln!(md, "\n**Summary:**  \n{}", summary.summary).unwrap();
    write_list(md, "Key Points", &summary.key_points);
    write_list(md, "Data Points", &summary.data_points);
    write_list(md, "Examples", &summary.examples);
    write_list(md, "Takeaways", &summary.takeaways);
    writeln!(md, "\n---").unwrap();
}

fn write_list(md: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    writeln!(md, "\n**{heading}:**").unwrap();
    for item in items {
        writeln!(md, "- {item}").unwrap();
    }
}

fn write_instructions(md: &mut String, categorized: &CategorizedArticles, options: &RenderOptions) {
    let site = &options.site_name;
    writeln!(md, "\n## Instructions for AI Assistant\n").unwrap();
    writeln!(md, "### How to Use This Document\n").unwrap();
    writeln!(
        md,
        "**Context:**\nThis document contains categorized summaries of {site} blog posts \
         covering experimentation, feature flags, product analytics, and engineering practices.\n"
    )
    .unwrap();
    writeln!(md, "**When brainstorming:**").unwrap();
    writeln!(
        md,
        "1. **Reference specific categories** when discussing related topics"
    )
    .unwrap();
    writeln!(md, "2. **Cite examples** from case studies and best practices").unwrap();
    writeln!(md, "3. **Apply patterns** from engineering and infrastructure posts").unwrap();
    writeln!(md, "4. **Consider trade-offs** mentioned in the articles").unwrap();
    writeln!(
        md,
        "5. **Use the key points and data points** as starting points for deeper discussions\n"
    )
    .unwrap();
    writeln!(md, "**Suggested prompts:**").unwrap();
    writeln!(
        md,
        "- \"Based on the A/B testing posts, what are best practices for [specific scenario]?\""
    )
    .unwrap();
    writeln!(
        md,
        "- \"What engineering patterns does {site} use for [specific challenge]?\""
    )
    .unwrap();
    writeln!(
        md,
        "- \"Compare approaches mentioned in the feature management vs. experimentation categories\""
    )
    .unwrap();
    writeln!(md, "- \"What lessons from the case studies apply to [your situation]?\"\n").unwrap();
    writeln!(md, "**Topic areas covered:**").unwrap();
    for (category, articles) in categorized {
        writeln!(md, "- **{}**: {} articles", category, articles.len()).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::categorize::Category;
    use crate::models::fixtures::article;
    use crate::models::group_by_category;

    fn options() -> RenderOptions {
        RenderOptions {
            site_name: "Statsig".to_string(),
            generated_at: "2025-05-06 20:30:00".to_string(),
        }
    }

    #[test]
    fn test_render_groups_alphabetically() {
        let grouped = group_by_category(vec![
            article(
                "flags",
                "Flags at scale",
                &[Category::FeatureManagement, Category::EngineeringInfrastructure],
            ),
            article("ab", "Running A/B tests", &[Category::AbTestingExperimentation]),
        ]);
        let md = render(&grouped, &options());

        assert!(md.starts_with("# Statsig Blog Posts - Categorized & Summarized\n"));
        assert!(md.contains("*Generated on: 2025-05-06 20:30:00*"));
        assert!(md.contains("*Total Posts: 2*"));
        assert!(md.contains("- [A/B Testing & Experimentation](#ab-testing--experimentation)"));

        let ab = md.find("\n## A/B Testing & Experimentation").unwrap();
        let eng = md.find("\n## Engineering & Infrastructure").unwrap();
        let feat = md.find("\n## Feature Management").unwrap();
        assert!(ab < eng && eng < feat);
        assert_eq!(md.matches("### 1. Flags at scale").count(), 2);
    }

    #[test]
    fn test_render_article_fields() {
        let mut a = article("p", "Post title", &[Category::General]);
        a.content.has_code = true;
        a.summary.key_points = vec!["First point".into(), "Second point".into()];
        a.summary.takeaways = vec!["Do the thing".into()];
        let md = render(&group_by_category(vec![a]), &options());

        assert!(md.contains("**Date:** 2025-05-06  "));
        assert!(md.contains("**Author:** Jane Doe  "));
        assert!(md.contains("**URL:** https://statsig.com/blog/p"));
        assert!(md.contains("**Categories:** General"));
        assert!(md.contains("**Contains:** code samples"));
        assert!(md.contains("**Summary:**  \nArticle about Post title"));
        assert!(md.contains("**Key Points:**\n- First point\n- Second point\n"));
        assert!(md.contains("**Takeaways:**\n- Do the thing\n"));
        assert!(!md.contains("**Data Points:**"));
        assert!(!md.contains("**Examples:**"));
        assert!(md.contains("- **General**: 1 articles"));
    }

    #[test]
    fn test_render_omits_empty_metadata() {
        let mut a = article("p", "Post title", &[Category::General]);
        a.content.author.clear();
        a.content.published_date.clear();
        let md = render(&group_by_category(vec![a]), &options());
        assert!(!md.contains("**Author:**"));
        assert!(!md.contains("**Date:**"));
        assert!(!md.contains("**Contains:**"));
    }

    #[test]
    fn test_render_empty() {
        let md = render(&CategorizedArticles::new(), &options());
        assert!(md.contains("*Total Posts: 0*"));
        assert!(md.contains("## Instructions for AI Assistant"));
    }
}
