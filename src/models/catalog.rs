//! Category and tag catalogs shown alongside the topic lists.

use serde::Serialize;

/// A fixed forum category.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// The forum's category catalog, in display order.
pub const CATEGORIES: &[Category] = &[
    Category {
        slug: "research-methodologies",
        title: "Research Methodologies",
        description: "Discuss research approaches, methodologies, and best practices.",
    },
    Category {
        slug: "technology-innovation",
        title: "Technology & Innovation",
        description: "Share the latest tech trends and innovative solutions.",
    },
    Category {
        slug: "collaboration-opportunities",
        title: "Collaboration Opportunities",
        description: "Find team members and collaborators for your research projects.",
    },
    Category {
        slug: "academic-resources",
        title: "Academic Resources",
        description: "Share and discover helpful academic resources and tools.",
    },
    Category {
        slug: "career-development",
        title: "Career Development",
        description: "Discuss career paths, internships, and professional development.",
    },
    Category {
        slug: "interdisciplinary-research",
        title: "Interdisciplinary Research",
        description: "Explore research that crosses traditional disciplinary boundaries.",
    },
    Category {
        slug: "funding-resources",
        title: "Funding & Resources",
        description: "Grants, scholarships, and where to find research funding.",
    },
    Category {
        slug: "general-discussion",
        title: "General Discussion",
        description: "Everything else about research life on campus.",
    },
];

/// Tags offered by the new-discussion form.
pub const SUGGESTED_TAGS: &[&str] = &[
    "Machine Learning",
    "Climate Science",
    "Data Analysis",
    "Sustainability",
    "Architecture",
    "Qualitative Research",
    "Quantum Computing",
    "Funding",
    "Grants",
    "Undergraduate Research",
];

/// A catalog category with live counts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub topic_count: usize,
    /// Topics plus their replies.
    pub post_count: usize,
}

/// A tag and how many topics use it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagSummary {
    pub name: String,
    pub topic_count: usize,
    pub suggested: bool,
}

/// Derive a URL slug: lowercase ASCII alphanumeric runs joined by `-`.
pub fn slugify(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
