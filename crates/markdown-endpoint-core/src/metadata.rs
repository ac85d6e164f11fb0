//! Content metadata handed in by the host alongside the rendered markup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot of a resource's metadata.
///
/// Optional fields that are `None` (or empty) are left out of the
/// frontmatter entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub title: String,
    pub published_at: NaiveDate,
    pub author_name: String,
    pub canonical_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl ContentMetadata {
    /// Create metadata with the required fields only
    pub fn new(
        title: impl Into<String>,
        published_at: NaiveDate,
        author_name: impl Into<String>,
        canonical_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            published_at,
            author_name: author_name.into(),
            canonical_url: canonical_url.into(),
            tags: None,
            categories: None,
            excerpt: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }
}
