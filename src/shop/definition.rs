//! Shop Data Model
//!
//! A shop owns everything it displays: the keeper NPC, every inventory
//! entry, the settings and optional appearance overrides are full copies,
//! never live aliases into the catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Item, Npc};

/// Hard cap on inventory entries per shop.
pub const MAX_INVENTORY: usize = 50;

/// Label used when no city could be resolved, and the archive bucket for
/// shops without a location.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Per-shop economy and flavor knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSettings {
    /// Global price multiplier; 1.0 means catalog prices.
    pub price_modifier: f64,
    /// Per-item-type multiplier on top of the global one. Types absent from
    /// the map count as 1.0.
    pub category_modifiers: HashMap<String, f64>,
    pub allow_barter: bool,
    pub flavor_text: String,
}

impl ShopSettings {
    pub fn category_modifier(&self, item_type: &str) -> f64 {
        self.category_modifiers.get(item_type).copied().unwrap_or(1.0)
    }
}

/// Optional per-shop color overrides. Any absent field falls through to the
/// global settings (or a hard-coded default) at render time; an absent
/// struct means "defaults everywhere".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopAppearance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A generated (and then hand-edited) shop. Created only by the generation
/// engine; archived snapshots stay untouched until explicitly re-saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub name: String,
    /// All selected archetypes joined with " & ".
    #[serde(rename = "type")]
    pub shop_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub npc: Npc,
    /// Insertion order is display order.
    pub inventory: Vec<Item>,
    pub settings: ShopSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<ShopAppearance>,
    /// The system tags this shop was generated under; scopes the add-item
    /// search to compatible catalog items later on.
    pub system_filter: Vec<String>,
}

impl Shop {
    pub fn find_item(&self, instance_id: &str) -> Option<&Item> {
        self.inventory.iter().find(|i| i.id == instance_id)
    }

    pub fn find_item_mut(&mut self, instance_id: &str) -> Option<&mut Item> {
        self.inventory.iter_mut().find(|i| i.id == instance_id)
    }
}
