//! Shop Editing Surface
//!
//! In-place mutation helpers for the currently loaded shop. These are thin
//! shallow-merge patches applied synchronously; none of the generation
//! logic lives here.

use serde::Deserialize;

use super::definition::{MAX_INVENTORY, Shop, ShopAppearance};
use crate::catalog::{CatalogStore, Item, Npc};
use crate::error::ValidationError;

/// Partial item update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub weight: Option<String>,
    pub rarity: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub system: Option<String>,
    pub description: Option<String>,
}

impl ItemPatch {
    pub fn apply(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(currency) = &self.currency {
            item.currency = currency.clone();
        }
        if let Some(weight) = &self.weight {
            item.weight = Some(weight.clone());
        }
        if let Some(rarity) = &self.rarity {
            item.rarity = rarity.clone();
        }
        if let Some(item_type) = &self.item_type {
            item.item_type = item_type.clone();
        }
        if let Some(system) = &self.system {
            item.system = system.clone();
        }
        if let Some(description) = &self.description {
            item.description = Some(description.clone());
        }
    }
}

/// Partial keeper update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcPatch {
    pub name: Option<String>,
    pub race: Option<String>,
    pub personality: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
}

impl NpcPatch {
    pub fn apply(&self, npc: &mut Npc) {
        if let Some(name) = &self.name {
            npc.name = name.clone();
        }
        if let Some(race) = &self.race {
            npc.race = race.clone();
        }
        if let Some(personality) = &self.personality {
            npc.personality = personality.clone();
        }
        if let Some(description) = &self.description {
            npc.description = description.clone();
        }
        if let Some(avatar_url) = &self.avatar_url {
            npc.avatar_url = avatar_url.clone();
        }
    }
}

/// Partial appearance update, merged into whatever overrides already exist.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearancePatch {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub background: Option<String>,
    pub surface: Option<String>,
    pub text: Option<String>,
}

/// Copy a catalog item into the inventory as a new entry. Returns `false`
/// when the item id is unknown (silent no-op); errors only when the
/// inventory is already at capacity.
pub fn add_catalog_item(
    shop: &mut Shop,
    catalog: &CatalogStore,
    item_id: &str,
) -> Result<bool, ValidationError> {
    if shop.inventory.len() >= MAX_INVENTORY {
        return Err(ValidationError::InventoryFull {
            capacity: MAX_INVENTORY,
        });
    }
    match catalog.item(item_id) {
        Some(item) => {
            shop.inventory.push(item.copy_with_new_id());
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Remove an inventory entry by its instance id. No-op when absent.
pub fn remove_item(shop: &mut Shop, instance_id: &str) -> bool {
    let before = shop.inventory.len();
    shop.inventory.retain(|i| i.id != instance_id);
    shop.inventory.len() != before
}

/// Patch an inventory entry in place. No-op when absent.
pub fn patch_item(shop: &mut Shop, instance_id: &str, patch: &ItemPatch) -> bool {
    match shop.find_item_mut(instance_id) {
        Some(item) => {
            patch.apply(item);
            true
        }
        None => false,
    }
}

/// Replace the keeper with a full copy of a catalog NPC. The previous
/// keeper is discarded wholesale; nothing of it is preserved.
pub fn load_keeper(shop: &mut Shop, catalog: &CatalogStore, npc_id: &str) -> bool {
    match catalog.npc(npc_id) {
        Some(found) => {
            shop.npc = found.clone();
            true
        }
        None => false,
    }
}

/// Merge appearance overrides, creating the override struct on first use.
pub fn patch_appearance(shop: &mut Shop, patch: &AppearancePatch) {
    let appearance = shop.appearance.get_or_insert_with(ShopAppearance::default);
    if let Some(primary) = &patch.primary {
        appearance.primary = Some(primary.clone());
    }
    if let Some(secondary) = &patch.secondary {
        appearance.secondary = Some(secondary.clone());
    }
    if let Some(background) = &patch.background {
        appearance.background = Some(background.clone());
    }
    if let Some(surface) = &patch.surface {
        appearance.surface = Some(surface.clone());
    }
    if let Some(text) = &patch.text {
        appearance.text = Some(text.clone());
    }
}

/// Drop every override so the shop falls back to global settings, rather
/// than pinning the current defaults as explicit values.
pub fn clear_appearance(shop: &mut Shop) {
    shop.appearance = None;
}

/// The add-item search: catalog items compatible with the shop's system
/// filter whose name contains `search` (case-insensitive).
pub fn compatible_items<'a>(
    shop: &Shop,
    catalog: &'a CatalogStore,
    search: &str,
) -> Vec<&'a Item> {
    let needle = search.to_lowercase();
    catalog
        .items()
        .iter()
        .filter(|i| shop.system_filter.iter().any(|s| *s == i.system))
        .filter(|i| needle.is_empty() || i.name.to_lowercase().contains(&needle))
        .collect()
}
