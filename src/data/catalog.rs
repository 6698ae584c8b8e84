//! Article ordering and tag aggregation.
//!
//! Tags are counted while articles are accepted, in first-seen order.
//! After all files are read the articles are sorted newest first, and the
//! catalog turns its counts into [`TagEntry`] values whose article lists
//! follow that sorted order.

use std::collections::{HashMap, HashSet};

use super::types::{Article, TagEntry, TaggedArticle};
use crate::utils::date::newest_first_key;

/// Sort articles by `published_at`, newest first.
///
/// Undated articles (and dates that do not parse) go last. The sort is
/// stable, so equal dates keep their input order.
pub fn sort_articles(articles: &mut [Article]) {
    articles.sort_by_cached_key(|article| newest_first_key(article.published_at.as_deref()));
}

/// Tag frequency accumulator.
#[derive(Debug, Default)]
pub struct TagCatalog {
    /// Tag names in first-seen order
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the tags of one accepted article.
    ///
    /// A tag listed twice on the same article is counted once.
    pub fn record(&mut self, tags: &[String]) {
        for tag in distinct(tags) {
            match self.counts.get_mut(tag) {
                Some(count) => *count += 1,
                None => {
                    self.order.push(tag.clone());
                    self.counts.insert(tag.clone(), 1);
                }
            }
        }
    }

    /// Number of distinct tags seen.
    pub fn distinct_tags(&self) -> usize {
        self.order.len()
    }

    /// Build tag entries sorted by count, highest first.
    ///
    /// Equal counts keep first-seen order. Each entry lists the articles
    /// carrying the tag in the order of `articles`.
    pub fn into_entries(self, articles: &[Article]) -> Vec<TagEntry> {
        let mut tagged: HashMap<&str, Vec<TaggedArticle>> = HashMap::new();
        for article in articles {
            for tag in distinct(&article.tags) {
                tagged
                    .entry(tag.as_str())
                    .or_default()
                    .push(TaggedArticle::from(article));
            }
        }

        let mut entries: Vec<TagEntry> = self
            .order
            .iter()
            .map(|name| TagEntry {
                name: name.clone(),
                count: self.counts[name],
                articles: tagged.remove(name.as_str()).unwrap_or_default(),
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

/// Tags with repeats removed, first occurrence kept.
fn distinct(tags: &[String]) -> impl Iterator<Item = &String> {
    let mut seen = HashSet::new();
    tags.iter().filter(move |tag| seen.insert(*tag))
}
