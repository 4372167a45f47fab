//! Built-in Seed Dataset
//!
//! The first-start fallback for every persisted collection, embedded at
//! compile time from the TOML files under `data/`.

use serde::Deserialize;

use super::city::City;
use super::item::Item;
use super::npc::Npc;
use super::taxonomy::Taxonomy;

const ITEMS_TOML: &str = include_str!("../../data/items.toml");
const NPCS_TOML: &str = include_str!("../../data/npcs.toml");
const CITIES_TOML: &str = include_str!("../../data/cities.toml");
const RULES_TOML: &str = include_str!("../../data/rules.toml");

#[derive(Deserialize)]
struct ItemsFile {
    items: Vec<Item>,
}

#[derive(Deserialize)]
struct NpcsFile {
    npcs: Vec<Npc>,
}

#[derive(Deserialize)]
struct CitiesFile {
    cities: Vec<City>,
}

#[derive(Deserialize)]
struct RulesFile {
    shop_types: Vec<String>,
    item_types: Vec<String>,
    systems: Vec<String>,
    rarities: Vec<String>,
}

/// The parsed seed collections, one field per persisted key so each can
/// stand in independently when its key is absent or unreadable.
pub struct SeedData {
    pub items: Vec<Item>,
    pub npcs: Vec<Npc>,
    pub cities: Vec<City>,
    pub shop_types: Taxonomy,
    pub item_types: Taxonomy,
    pub systems: Taxonomy,
    pub rarities: Taxonomy,
}

impl SeedData {
    pub fn load() -> Self {
        let items: ItemsFile = toml::from_str(ITEMS_TOML).expect("embedded items.toml is valid");
        let npcs: NpcsFile = toml::from_str(NPCS_TOML).expect("embedded npcs.toml is valid");
        let cities: CitiesFile =
            toml::from_str(CITIES_TOML).expect("embedded cities.toml is valid");
        let rules: RulesFile = toml::from_str(RULES_TOML).expect("embedded rules.toml is valid");

        Self {
            items: items.items,
            npcs: npcs.npcs,
            cities: cities.cities,
            shop_types: Taxonomy::new(rules.shop_types),
            item_types: Taxonomy::new(rules.item_types),
            systems: Taxonomy::new(rules.systems),
            rarities: Taxonomy::new(rules.rarities),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_parses_and_is_populated() {
        let seed = SeedData::load();
        assert!(!seed.items.is_empty());
        assert!(!seed.npcs.is_empty());
        assert!(!seed.cities.is_empty());
        assert!(seed.shop_types.contains("General"));
        assert!(seed.systems.contains("Generic"));
        assert!(seed.rarities.contains("Legendary"));
    }

    #[test]
    fn test_seed_items_reference_known_tags() {
        let seed = SeedData::load();
        for item in &seed.items {
            assert!(
                seed.item_types.contains(&item.item_type),
                "item {} has unseeded type {}",
                item.id,
                item.item_type
            );
            assert!(
                seed.systems.contains(&item.system),
                "item {} has unseeded system {}",
                item.id,
                item.system
            );
        }
    }

    #[test]
    fn test_seed_npcs_carry_ids() {
        let seed = SeedData::load();
        assert!(seed.npcs.iter().all(|n| n.id.is_some()));
    }
}
