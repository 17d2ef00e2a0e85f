//! Keyword-based topic classification.
//!
//! A post receives every category whose keyword list has at least one entry
//! occurring as a substring of its lowercased title and body. Posts matching
//! nothing are filed under [`Category::General`].

use std::collections::BTreeSet;
use std::fmt;

/// Topic categories.
///
/// Variants are declared in alphabetical order of their labels so that the
/// derived `Ord` is the report's display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    AbTestingExperimentation,
    AiMachineLearning,
    BestPracticesGuides,
    CaseStudies,
    CompanyUpdates,
    DataEngineering,
    EngineeringInfrastructure,
    FeatureManagement,
    General,
    ProductAnalytics,
    ProductDevelopment,
}

impl Category {
    /// Every keyword-backed category. `General` is the fallback and has no keywords.
    pub const KEYWORDED: [Category; 10] = [
        Category::EngineeringInfrastructure,
        Category::AbTestingExperimentation,
        Category::AiMachineLearning,
        Category::ProductAnalytics,
        Category::FeatureManagement,
        Category::CompanyUpdates,
        Category::CaseStudies,
        Category::ProductDevelopment,
        Category::DataEngineering,
        Category::BestPracticesGuides,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::EngineeringInfrastructure => "Engineering & Infrastructure",
            Category::AbTestingExperimentation => "A/B Testing & Experimentation",
            Category::AiMachineLearning => "AI & Machine Learning",
            Category::ProductAnalytics => "Product Analytics",
            Category::FeatureManagement => "Feature Management",
            Category::CompanyUpdates => "Company Updates",
            Category::CaseStudies => "Case Studies & Success Stories",
            Category::ProductDevelopment => "Product Development",
            Category::DataEngineering => "Data Engineering",
            Category::BestPracticesGuides => "Best Practices & Guides",
            Category::General => "General",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::EngineeringInfrastructure => &[
                "infrastructure",
                "performance",
                "optimization",
                "memory",
                "server",
                "architecture",
                "scaling",
                "compute",
                "gke",
                "cloud",
                "kubernetes",
            ],
            Category::AbTestingExperimentation => &[
                "experiment",
                "a/b test",
                "testing",
                "hypothesis",
                "control",
                "variant",
                "statistical",
                "p-value",
                "multiple comparison",
            ],
            Category::AiMachineLearning => &[
                "ai",
                "machine learning",
                "llm",
                "gpt",
                "openai",
                "artificial intelligence",
                "model",
                "ai-generated",
            ],
            Category::ProductAnalytics => &[
                "analytics",
                "metrics",
                "measurement",
                "tracking",
                "data",
                "insights",
                "count distinct",
            ],
            Category::FeatureManagement => &[
                "feature flag",
                "feature gate",
                "rollout",
                "deployment",
                "release",
            ],
            Category::CompanyUpdates => &[
                "announcement",
                "acquisition",
                "partnership",
                "funding",
                "team",
            ],
            Category::CaseStudies => &[
                "case study",
                "customer",
                "how we",
                "lessons learned",
                "story behind",
            ],
            Category::ProductDevelopment => &[
                "product",
                "development",
                "building",
                "design",
                "user experience",
            ],
            Category::DataEngineering => &[
                "warehouse",
                "data pipeline",
                "etl",
                "data platform",
                "fabric",
                "microsoft",
            ],
            Category::BestPracticesGuides => {
                &["guide", "best practice", "how to", "tutorial", "tips"]
            }
            Category::General => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Assign categories to a post from its title and body text.
pub fn categorize(title: &str, body_text: &str) -> BTreeSet<Category> {
    let haystack = format!("{title} {body_text}").to_lowercase();

    let mut categories: BTreeSet<Category> = Category::KEYWORDED
        .into_iter()
        .filter(|c| c.keywords().iter().any(|k| haystack.contains(k)))
        .collect();

    if categories.is_empty() {
        categories.insert(Category::General);
    }
    tracing::debug!(?categories, "Categorized post");
    categories
}
