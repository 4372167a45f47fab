use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// The four independent tag taxonomies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    ShopType,
    ItemType,
    System,
    Rarity,
}

/// An ordered set of free-form string tags. Tags carry no metadata, and
/// deleting one never cascades into the items that reference it; dangling
/// references display as literal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    tags: Vec<String>,
}

impl Taxonomy {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Append a tag. Duplicate suppression is the caller's job; a repeated
    /// tag is tolerated as a display nuisance, not rejected.
    pub fn add(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    /// Remove every occurrence of `tag`. No-op when absent.
    pub fn remove(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Set-union with `incoming`: existing tags keep their order, unseen
    /// incoming tags follow, and the result is fully deduplicated.
    pub fn union(&mut self, incoming: &[String]) {
        let mut merged: IndexSet<String> = self.tags.drain(..).collect();
        for tag in incoming {
            merged.insert(tag.clone());
        }
        self.tags = merged.into_iter().collect();
    }
}
