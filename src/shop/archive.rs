//! Shop Archive
//!
//! Named shop snapshots. Saving is an upsert by id; a re-saved shop keeps
//! its position in the list. Loading hands out clones, so edits to the
//! current shop never reach an archived record until it is saved again.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::definition::{Shop, UNKNOWN_LOCATION};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopArchive {
    shops: Vec<Shop>,
}

impl ShopArchive {
    pub fn new(shops: Vec<Shop>) -> Self {
        Self { shops }
    }

    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    pub fn get(&self, id: &str) -> Option<&Shop> {
        self.shops.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.shops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }

    /// Upsert by id: replace in place when the id exists, append otherwise.
    pub fn save(&mut self, shop: Shop) {
        match self.shops.iter_mut().find(|s| s.id == shop.id) {
            Some(slot) => *slot = shop,
            None => self.shops.push(shop),
        }
    }

    /// Remove by id. No-op when absent.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.shops.len();
        self.shops.retain(|s| s.id != id);
        self.shops.len() != before
    }

    /// Display grouping by location, insertion-ordered, with a literal
    /// bucket for shops that have none. Purely presentational; nothing is
    /// stored per group.
    pub fn grouped_by_location(&self) -> IndexMap<&str, Vec<&Shop>> {
        let mut groups: IndexMap<&str, Vec<&Shop>> = IndexMap::new();
        for shop in &self.shops {
            let location = shop.location.as_deref().unwrap_or(UNKNOWN_LOCATION);
            groups.entry(location).or_default().push(shop);
        }
        groups
    }
}
