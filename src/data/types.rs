//! Data types for the generated json documents.
//!
//! Field names are serialized in camelCase to match what front-ends read.

use serde::Serialize;

/// One accepted article, as listed in `index.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Frontmatter `id`, or the filename without `.md`
    pub id: String,

    /// First `# heading`, or derived from the filename
    pub title: String,

    /// Plain-text preview of the body
    pub excerpt: String,

    /// Tags in frontmatter order (duplicates kept)
    pub tags: Vec<String>,

    /// Creation date, falls back to `published_at`. Serialized as `null` when absent.
    pub created_at: Option<String>,

    /// Publication date, falls back to `created_at`. Serialized as `null` when absent.
    pub published_at: Option<String>,

    /// Source file name (e.g., "2024-01-15_hello-world.md")
    pub filename: String,

    /// Link path (e.g., "Article/2024-01-15_hello-world.md")
    pub path: String,
}

/// An article reference within a tag entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedArticle {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub published_at: Option<String>,
    pub path: String,
}

impl From<&Article> for TaggedArticle {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            published_at: article.published_at.clone(),
            path: article.path.clone(),
        }
    }
}

/// One tag in `tags.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagEntry {
    pub name: String,

    /// Number of articles carrying this tag
    pub count: usize,

    /// Articles carrying this tag, newest first
    pub articles: Vec<TaggedArticle>,
}

/// `index.json`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    pub articles: Vec<Article>,
    pub total_count: usize,
    pub last_updated: String,
}

impl IndexDocument {
    pub fn new(articles: Vec<Article>, last_updated: String) -> Self {
        Self {
            total_count: articles.len(),
            articles,
            last_updated,
        }
    }
}

/// `tags.json`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsDocument {
    pub tags: Vec<TagEntry>,
    pub total_tags: usize,
    pub last_updated: String,
}

impl TagsDocument {
    pub fn new(tags: Vec<TagEntry>, last_updated: String) -> Self {
        Self {
            total_tags: tags.len(),
            tags,
            last_updated,
        }
    }
}
