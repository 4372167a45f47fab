use serde::{Deserialize, Serialize};

use super::mint_id;

/// A catalog item. `rarity`, `item_type` and `system` are free-form tags
/// drawn from (but not enforced against) the taxonomies; a tag deleted from
/// its taxonomy just displays as a literal string here.
///
/// `price` is a currency-agnostic unit and is expected to be non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Empty when an imported record arrived without one; the store mints a
    /// fresh id before merging.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    pub rarity: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub system: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Item {
    /// Deep copy with a brand-new id. Every item crossing from the catalog
    /// into a shop goes through this, so catalog edits never reach into
    /// shops that already took a copy, and the same catalog item can sit
    /// in one inventory twice as two distinct entries.
    pub fn copy_with_new_id(&self) -> Item {
        let mut copy = self.clone();
        copy.id = mint_id();
        copy
    }
}
