//! Catalog Store
//!
//! CRUD and bulk import over the shared collections: items, NPCs, cities,
//! and the four tag taxonomies. Everything a shop takes from here crosses
//! the boundary as a deep copy; consumers only ever see `&`-views.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::city::City;
use super::item::Item;
use super::mint_id;
use super::npc::Npc;
use super::taxonomy::{Taxonomy, TaxonomyKind};
use crate::error::ImportError;
use indexmap::IndexMap;

/// The shared, reusable collections, editable independent of any shop.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    items: Vec<Item>,
    npcs: Vec<Npc>,
    cities: Vec<City>,
    shop_types: Taxonomy,
    item_types: Taxonomy,
    systems: Taxonomy,
    rarities: Taxonomy,
}

/// The rules import/export document: any subset of the four taxonomies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systems: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarities: Option<Vec<String>>,
}

impl CatalogStore {
    pub fn from_parts(
        items: Vec<Item>,
        npcs: Vec<Npc>,
        cities: Vec<City>,
        shop_types: Taxonomy,
        item_types: Taxonomy,
        systems: Taxonomy,
        rarities: Taxonomy,
    ) -> Self {
        Self {
            items,
            npcs,
            cities,
            shop_types,
            item_types,
            systems,
            rarities,
        }
    }

    // ========================================================================
    // Read access (immutable views only)
    // ========================================================================

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn npc(&self, id: &str) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.id.as_deref() == Some(id))
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city(&self, id: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    pub fn taxonomy(&self, kind: TaxonomyKind) -> &Taxonomy {
        match kind {
            TaxonomyKind::ShopType => &self.shop_types,
            TaxonomyKind::ItemType => &self.item_types,
            TaxonomyKind::System => &self.systems,
            TaxonomyKind::Rarity => &self.rarities,
        }
    }

    fn taxonomy_mut(&mut self, kind: TaxonomyKind) -> &mut Taxonomy {
        match kind {
            TaxonomyKind::ShopType => &mut self.shop_types,
            TaxonomyKind::ItemType => &mut self.item_types,
            TaxonomyKind::System => &mut self.systems,
            TaxonomyKind::Rarity => &mut self.rarities,
        }
    }

    // ========================================================================
    // Item CRUD
    // ========================================================================

    /// Append an item. The caller mints the id before insertion.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Replace the item whose id matches. Silent no-op when there is none.
    pub fn update_item(&mut self, item: Item) -> bool {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove the item with `id`. No-op when absent.
    pub fn delete_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Merge `incoming` by id: incoming records win on collision, records
    /// without an id get a fresh one, untouched records keep their order.
    pub fn import_items(&mut self, incoming: Vec<Item>) {
        let mut by_id: IndexMap<String, Item> = self
            .items
            .drain(..)
            .map(|i| (i.id.clone(), i))
            .collect();
        for mut item in incoming {
            if item.id.is_empty() {
                item.id = mint_id();
            }
            by_id.insert(item.id.clone(), item);
        }
        self.items = by_id.into_values().collect();
    }

    // ========================================================================
    // NPC CRUD
    // ========================================================================

    pub fn add_npc(&mut self, npc: Npc) {
        self.npcs.push(npc);
    }

    pub fn update_npc(&mut self, npc: Npc) -> bool {
        if npc.id.is_none() {
            return false;
        }
        match self.npcs.iter_mut().find(|n| n.id == npc.id) {
            Some(slot) => {
                *slot = npc;
                true
            }
            None => false,
        }
    }

    pub fn delete_npc(&mut self, id: &str) -> bool {
        let before = self.npcs.len();
        self.npcs.retain(|n| n.id.as_deref() != Some(id));
        self.npcs.len() != before
    }

    pub fn import_npcs(&mut self, incoming: Vec<Npc>) {
        let mut by_id: IndexMap<String, Npc> = IndexMap::new();
        for npc in self.npcs.drain(..) {
            let key = npc.id.clone().unwrap_or_else(mint_id);
            by_id.insert(key, npc);
        }
        for mut npc in incoming {
            let id = npc.id.clone().unwrap_or_else(mint_id);
            npc.id = Some(id.clone());
            by_id.insert(id, npc);
        }
        self.npcs = by_id.into_values().collect();
    }

    // ========================================================================
    // City CRUD
    // ========================================================================

    pub fn add_city(&mut self, city: City) {
        self.cities.push(city);
    }

    pub fn update_city(&mut self, city: City) -> bool {
        match self.cities.iter_mut().find(|c| c.id == city.id) {
            Some(slot) => {
                *slot = city;
                true
            }
            None => false,
        }
    }

    pub fn delete_city(&mut self, id: &str) -> bool {
        let before = self.cities.len();
        self.cities.retain(|c| c.id != id);
        self.cities.len() != before
    }

    pub fn import_cities(&mut self, incoming: Vec<City>) {
        let mut by_id: IndexMap<String, City> = self
            .cities
            .drain(..)
            .map(|c| (c.id.clone(), c))
            .collect();
        for mut city in incoming {
            if city.id.is_empty() {
                city.id = mint_id();
            }
            by_id.insert(city.id.clone(), city);
        }
        self.cities = by_id.into_values().collect();
    }

    // ========================================================================
    // Taxonomy management
    // ========================================================================

    pub fn add_tag(&mut self, kind: TaxonomyKind, tag: impl Into<String>) {
        self.taxonomy_mut(kind).add(tag);
    }

    pub fn remove_tag(&mut self, kind: TaxonomyKind, tag: &str) {
        self.taxonomy_mut(kind).remove(tag);
    }

    /// Union every taxonomy present in the payload into its counterpart.
    pub fn import_rules(&mut self, payload: &RulesPayload) {
        if let Some(tags) = &payload.shop_types {
            self.shop_types.union(tags);
        }
        if let Some(tags) = &payload.item_types {
            self.item_types.union(tags);
        }
        if let Some(tags) = &payload.systems {
            self.systems.union(tags);
        }
        if let Some(tags) = &payload.rarities {
            self.rarities.union(tags);
        }
    }

    // ========================================================================
    // JSON import/export entry points
    // ========================================================================
    //
    // Imports parse the whole payload before touching any collection, so a
    // malformed or wrong-shaped document is rejected with the store exactly
    // as it was.

    pub fn import_items_json(&mut self, payload: &str) -> Result<usize, ImportError> {
        let incoming: Vec<Item> = serde_json::from_str(payload)?;
        let count = incoming.len();
        self.import_items(incoming);
        info!("Imported {} item record(s), catalog now holds {}", count, self.items.len());
        Ok(count)
    }

    pub fn import_npcs_json(&mut self, payload: &str) -> Result<usize, ImportError> {
        let incoming: Vec<Npc> = serde_json::from_str(payload)?;
        let count = incoming.len();
        self.import_npcs(incoming);
        info!("Imported {} NPC record(s), catalog now holds {}", count, self.npcs.len());
        Ok(count)
    }

    pub fn import_cities_json(&mut self, payload: &str) -> Result<usize, ImportError> {
        let incoming: Vec<City> = serde_json::from_str(payload)?;
        let count = incoming.len();
        self.import_cities(incoming);
        info!("Imported {} city record(s), catalog now holds {}", count, self.cities.len());
        Ok(count)
    }

    pub fn import_rules_json(&mut self, payload: &str) -> Result<(), ImportError> {
        let rules: RulesPayload = serde_json::from_str(payload)?;
        self.import_rules(&rules);
        info!("Imported taxonomy rules");
        Ok(())
    }

    pub fn export_items_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.items)
    }

    pub fn export_npcs_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.npcs)
    }

    pub fn export_cities_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.cities)
    }

    pub fn export_rules_json(&self) -> Result<String, serde_json::Error> {
        let payload = RulesPayload {
            shop_types: Some(self.shop_types.tags().to_vec()),
            item_types: Some(self.item_types.tags().to_vec()),
            systems: Some(self.systems.tags().to_vec()),
            rarities: Some(self.rarities.tags().to_vec()),
        };
        serde_json::to_string_pretty(&payload)
    }
}
