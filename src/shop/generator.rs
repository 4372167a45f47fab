//! Shop Generation Engine
//!
//! Pure functions over a catalog snapshot producing a new `Shop`. Every
//! missing-data path has a defined fallback; generation never errors once
//! the request itself has been validated.

use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;
use tracing::warn;

use super::definition::{Shop, ShopSettings, UNKNOWN_LOCATION};
use super::pools;
use crate::catalog::{CatalogStore, Item, Npc, TaxonomyKind, mint_id};
use crate::error::ValidationError;

/// Shop-type tag that short-circuits archetype filtering: everything in the
/// system pool is relevant.
pub const GENERAL_SHOP_TYPE: &str = "General";

/// Keeper choice. Replaces the UI's "random" sentinel string at the
/// interface boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NpcSelector {
    Random,
    Specific(String),
}

impl NpcSelector {
    /// Map a raw selector value ("random" or an NPC id) onto the enum.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() || raw == "random" {
            NpcSelector::Random
        } else {
            NpcSelector::Specific(raw.to_string())
        }
    }
}

/// Location choice, same boundary treatment as [`NpcSelector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSelector {
    Random,
    Named(String),
}

impl LocationSelector {
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() || raw == "random" {
            LocationSelector::Random
        } else {
            LocationSelector::Named(raw.to_string())
        }
    }
}

/// Everything the engine needs from the caller.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub shop_types: Vec<String>,
    pub systems: Vec<String>,
    pub min_items: u32,
    pub max_items: u32,
    pub npc: NpcSelector,
    pub location: LocationSelector,
}

impl GenerationRequest {
    /// Caller preconditions, checked before any state change. The engine
    /// itself only re-clamps the count range defensively.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.shop_types.is_empty() {
            return Err(ValidationError::NoShopTypes);
        }
        if self.systems.is_empty() {
            return Err(ValidationError::NoSystems);
        }
        let in_bounds = |n: u32| (1..=50).contains(&n);
        if !in_bounds(self.min_items) || !in_bounds(self.max_items) {
            return Err(ValidationError::ItemCountOutOfRange {
                min: self.min_items,
                max: self.max_items,
            });
        }
        if self.min_items > self.max_items {
            return Err(ValidationError::InvertedItemRange {
                min: self.min_items,
                max: self.max_items,
            });
        }
        Ok(())
    }
}

/// Fixed archetype-to-item-type policy. Custom shop types fall back to
/// literal type-name matching.
fn archetype_matches(shop_type: &str, item_type: &str) -> bool {
    match shop_type {
        "Blacksmith" => matches!(item_type, "Weapon" | "Armor"),
        "Alchemist" => item_type == "Potion",
        "Magic" => matches!(item_type, "MagicItem" | "Potion"),
        "Tavern" => matches!(item_type, "Service" | "Gear"),
        other => item_type == other,
    }
}

fn item_is_relevant(shop_types: &[String], item_type: &str) -> bool {
    if shop_types.iter().any(|t| t == GENERAL_SHOP_TYPE) {
        return true;
    }
    shop_types.iter().any(|t| archetype_matches(t, item_type))
}

fn pick<'a>(pool: &[&'a str], rng: &mut impl Rng) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

fn resolve_keeper(catalog: &CatalogStore, selector: &NpcSelector, rng: &mut impl Rng) -> Npc {
    match selector {
        NpcSelector::Specific(id) => match catalog.npc(id) {
            // Full copy, original id included.
            Some(found) => found.clone(),
            None => {
                warn!("Keeper '{}' is not in the catalog, using placeholder", id);
                Npc::placeholder()
            }
        },
        NpcSelector::Random => Npc {
            id: None,
            name: pick(pools::KEEPER_NAMES, rng).to_string(),
            race: pick(pools::KEEPER_RACES, rng).to_string(),
            personality: pick(pools::KEEPER_TRAITS, rng).to_string(),
            description: pools::KEEPER_DESCRIPTION.to_string(),
            // Timestamp seed keeps the placeholder image pseudo-stable per
            // generation while staying unique across generations.
            avatar_url: format!(
                "https://picsum.photos/seed/{}/200",
                Utc::now().timestamp_millis()
            ),
        },
    }
}

fn resolve_location(
    catalog: &CatalogStore,
    selector: &LocationSelector,
    rng: &mut impl Rng,
) -> String {
    match selector {
        LocationSelector::Named(name) => name.clone(),
        LocationSelector::Random => {
            let cities = catalog.cities();
            if cities.is_empty() {
                UNKNOWN_LOCATION.to_string()
            } else {
                cities[rng.gen_range(0..cities.len())].name.clone()
            }
        }
    }
}

/// Assemble a brand-new shop from the catalog under the request's rules.
///
/// Selection is with replacement: the same catalog item may land in the
/// inventory twice, and each draw becomes a distinct entry with a fresh id.
/// When the archetype filter leaves nothing but the system pool has stock,
/// the whole system pool is used instead; a shop is never empty while
/// something compatible exists.
pub fn generate_shop(
    catalog: &CatalogStore,
    request: &GenerationRequest,
    rng: &mut impl Rng,
) -> Shop {
    let pool: Vec<&Item> = catalog
        .items()
        .iter()
        .filter(|i| request.systems.iter().any(|s| *s == i.system))
        .collect();
    let relevant: Vec<&Item> = pool
        .iter()
        .copied()
        .filter(|i| item_is_relevant(&request.shop_types, &i.item_type))
        .collect();

    // Defensive re-clamp; validated callers never hit the max() branch.
    let effective_min = request.min_items;
    let effective_max = request.max_items.max(effective_min);
    let target_count = rng.gen_range(effective_min..=effective_max);

    let safe_pool = if relevant.is_empty() { &pool } else { &relevant };
    let mut inventory = Vec::new();
    if !safe_pool.is_empty() {
        for _ in 0..target_count {
            let source = safe_pool[rng.gen_range(0..safe_pool.len())];
            inventory.push(source.copy_with_new_id());
        }
    }

    let keeper = resolve_keeper(catalog, &request.npc, rng);
    let location = resolve_location(catalog, &request.location, rng);

    // Baseline of 1.0 for every current item-type tag, so per-category
    // sliders have a defined starting point even for types added later.
    let mut category_modifiers = HashMap::new();
    for tag in catalog.taxonomy(TaxonomyKind::ItemType).tags() {
        category_modifiers.insert(tag.clone(), 1.0);
    }

    let label = if request.shop_types.len() == 1 {
        request.shop_types[0].as_str()
    } else {
        "Emporium"
    };

    Shop {
        id: mint_id(),
        name: format!("{}'s {}", keeper.name, label),
        shop_type: request.shop_types.join(" & "),
        location: Some(location),
        npc: keeper,
        inventory,
        settings: ShopSettings {
            price_modifier: 1.0,
            category_modifiers,
            allow_barter: rng.gen_bool(0.5),
            flavor_text: pick(pools::FLAVOR_TEXTS, rng).to_string(),
        },
        appearance: None,
        system_filter: request.systems.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{City, Taxonomy};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn item(id: &str, name: &str, item_type: &str, system: &str) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            price: 10.0,
            currency: "gp".to_string(),
            weight: None,
            rarity: "Common".to_string(),
            item_type: item_type.to_string(),
            system: system.to_string(),
            description: None,
        }
    }

    fn npc(id: &str, name: &str) -> Npc {
        Npc {
            id: Some(id.to_string()),
            name: name.to_string(),
            race: "Dwarf".to_string(),
            personality: "Gruff".to_string(),
            description: String::new(),
            avatar_url: String::new(),
        }
    }

    fn tags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn fixture_catalog() -> CatalogStore {
        CatalogStore::from_parts(
            vec![
                item("itm-sword", "Longsword", "Weapon", "D&D 5e"),
                item("itm-mail", "Chain Mail", "Armor", "D&D 5e"),
                item("itm-potion", "Potion of Healing", "Potion", "D&D 5e"),
                item("itm-bag", "Bag of Holding", "MagicItem", "D&D 5e"),
                item("itm-rope", "Rope", "Gear", "Generic"),
                item("itm-meal", "Hot Meal", "Service", "Generic"),
                item("itm-salve", "Healing Salve", "Potion", "Generic"),
            ],
            vec![npc("npc-durnan", "Durnan Stoutkeg")],
            vec![
                City {
                    id: "1".to_string(),
                    name: "Neverwinter".to_string(),
                    description: None,
                },
                City {
                    id: "2".to_string(),
                    name: "Waterdeep".to_string(),
                    description: None,
                },
            ],
            Taxonomy::new(tags(&["General", "Blacksmith", "Alchemist", "Magic", "Tavern"])),
            Taxonomy::new(tags(&["Weapon", "Armor", "Potion", "MagicItem", "Service", "Gear"])),
            Taxonomy::new(tags(&["D&D 5e", "Generic"])),
            Taxonomy::new(tags(&["Common", "Rare"])),
        )
    }

    fn request(shop_types: &[&str], systems: &[&str], min: u32, max: u32) -> GenerationRequest {
        GenerationRequest {
            shop_types: tags(shop_types),
            systems: tags(systems),
            min_items: min,
            max_items: max,
            npc: NpcSelector::Random,
            location: LocationSelector::Random,
        }
    }

    #[test]
    fn test_validate_rejects_bad_requests() {
        assert_eq!(
            request(&[], &["Generic"], 1, 5).validate(),
            Err(ValidationError::NoShopTypes)
        );
        assert_eq!(
            request(&["General"], &[], 1, 5).validate(),
            Err(ValidationError::NoSystems)
        );
        assert_eq!(
            request(&["General"], &["Generic"], 0, 5).validate(),
            Err(ValidationError::ItemCountOutOfRange { min: 0, max: 5 })
        );
        assert_eq!(
            request(&["General"], &["Generic"], 1, 51).validate(),
            Err(ValidationError::ItemCountOutOfRange { min: 1, max: 51 })
        );
        assert_eq!(
            request(&["General"], &["Generic"], 10, 5).validate(),
            Err(ValidationError::InvertedItemRange { min: 10, max: 5 })
        );
        assert!(request(&["General"], &["Generic"], 3, 10).validate().is_ok());
    }

    #[test]
    fn test_inventory_size_stays_within_bounds() {
        let catalog = fixture_catalog();
        let req = request(&["General"], &["D&D 5e", "Generic"], 3, 10);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let shop = generate_shop(&catalog, &req, &mut rng);
            assert!(
                (3..=10).contains(&shop.inventory.len()),
                "seed {} produced {} items",
                seed,
                shop.inventory.len()
            );
        }
    }

    #[test]
    fn test_archetype_filter_narrows_stock() {
        let catalog = fixture_catalog();
        let req = request(&["Blacksmith"], &["D&D 5e"], 5, 5);
        let mut rng = StdRng::seed_from_u64(7);
        let shop = generate_shop(&catalog, &req, &mut rng);
        assert_eq!(shop.inventory.len(), 5);
        for entry in &shop.inventory {
            assert!(matches!(entry.item_type.as_str(), "Weapon" | "Armor"));
        }
    }

    #[test]
    fn test_general_takes_whole_system_pool() {
        let catalog = fixture_catalog();
        let req = request(&["General"], &["Generic"], 5, 5);
        let mut rng = StdRng::seed_from_u64(11);
        let shop = generate_shop(&catalog, &req, &mut rng);
        for entry in &shop.inventory {
            assert_eq!(entry.system, "Generic");
        }
    }

    #[test]
    fn test_fallback_to_system_pool_when_archetype_is_dry() {
        // No Weapon/Armor is tagged "Generic", but the system pool has stock:
        // a Blacksmith there still opens with whatever the system offers.
        let catalog = fixture_catalog();
        let req = request(&["Blacksmith"], &["Generic"], 4, 4);
        let mut rng = StdRng::seed_from_u64(3);
        let shop = generate_shop(&catalog, &req, &mut rng);
        assert_eq!(shop.inventory.len(), 4);
        for entry in &shop.inventory {
            assert_eq!(entry.system, "Generic");
        }
    }

    #[test]
    fn test_empty_system_pool_yields_empty_inventory() {
        let catalog = fixture_catalog();
        let req = request(&["General"], &["Call of Cthulhu"], 5, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let shop = generate_shop(&catalog, &req, &mut rng);
        assert!(shop.inventory.is_empty());
    }

    #[test]
    fn test_every_copy_gets_a_fresh_distinct_id() {
        let catalog = fixture_catalog();
        // Pool of two relevant items, ten draws: duplicates guaranteed.
        let req = request(&["Blacksmith"], &["D&D 5e"], 10, 10);
        let mut rng = StdRng::seed_from_u64(5);
        let shop = generate_shop(&catalog, &req, &mut rng);

        let mut seen = std::collections::HashSet::new();
        for entry in &shop.inventory {
            assert!(seen.insert(entry.id.clone()), "duplicate instance id");
            assert!(catalog.item(&entry.id).is_none(), "instance id collides with catalog");
        }
    }

    #[test]
    fn test_specific_keeper_is_copied_with_id() {
        let catalog = fixture_catalog();
        let mut req = request(&["Tavern"], &["Generic"], 1, 3);
        req.npc = NpcSelector::Specific("npc-durnan".to_string());
        let mut rng = StdRng::seed_from_u64(2);
        let shop = generate_shop(&catalog, &req, &mut rng);
        assert_eq!(shop.npc.name, "Durnan Stoutkeg");
        assert_eq!(shop.npc.id.as_deref(), Some("npc-durnan"));
        assert!(shop.name.starts_with("Durnan Stoutkeg's"));
    }

    #[test]
    fn test_missing_keeper_degrades_to_placeholder() {
        let catalog = fixture_catalog();
        let mut req = request(&["Tavern"], &["Generic"], 1, 3);
        req.npc = NpcSelector::Specific("npc-nobody".to_string());
        let mut rng = StdRng::seed_from_u64(2);
        let shop = generate_shop(&catalog, &req, &mut rng);
        assert_eq!(shop.npc.name, "Unknown");
        assert_eq!(shop.npc.race, "Unknown");
        assert_eq!(shop.npc.personality, "Unknown");
    }

    #[test]
    fn test_random_keeper_draws_from_fixed_pools() {
        let catalog = fixture_catalog();
        let req = request(&["Tavern"], &["Generic"], 1, 3);
        let mut rng = StdRng::seed_from_u64(9);
        let shop = generate_shop(&catalog, &req, &mut rng);
        assert!(pools::KEEPER_NAMES.contains(&shop.npc.name.as_str()));
        assert!(pools::KEEPER_RACES.contains(&shop.npc.race.as_str()));
        assert!(pools::KEEPER_TRAITS.contains(&shop.npc.personality.as_str()));
        assert!(shop.npc.id.is_none());
        assert!(shop.npc.avatar_url.starts_with("https://picsum.photos/seed/"));
    }

    #[test]
    fn test_named_location_is_used_verbatim() {
        let catalog = fixture_catalog();
        let mut req = request(&["General"], &["Generic"], 1, 3);
        req.location = LocationSelector::Named("Evermoor".to_string());
        let mut rng = StdRng::seed_from_u64(4);
        let shop = generate_shop(&catalog, &req, &mut rng);
        assert_eq!(shop.location.as_deref(), Some("Evermoor"));
    }

    #[test]
    fn test_random_location_samples_cities_or_falls_back() {
        let catalog = fixture_catalog();
        let req = request(&["General"], &["Generic"], 1, 3);
        let mut rng = StdRng::seed_from_u64(4);
        let shop = generate_shop(&catalog, &req, &mut rng);
        let location = shop.location.unwrap();
        assert!(location == "Neverwinter" || location == "Waterdeep");

        let empty = CatalogStore::default();
        let shop = generate_shop(&empty, &req, &mut rng);
        assert_eq!(shop.location.as_deref(), Some(UNKNOWN_LOCATION));
    }

    #[test]
    fn test_multi_archetype_naming() {
        let catalog = fixture_catalog();
        let mut req = request(&["Blacksmith", "Tavern"], &["D&D 5e"], 1, 3);
        req.npc = NpcSelector::Specific("npc-durnan".to_string());
        let mut rng = StdRng::seed_from_u64(6);
        let shop = generate_shop(&catalog, &req, &mut rng);
        assert_eq!(shop.name, "Durnan Stoutkeg's Emporium");
        assert_eq!(shop.shop_type, "Blacksmith & Tavern");
    }

    #[test]
    fn test_settings_start_at_baseline() {
        let catalog = fixture_catalog();
        let req = request(&["General"], &["Generic"], 1, 3);
        let mut rng = StdRng::seed_from_u64(8);
        let shop = generate_shop(&catalog, &req, &mut rng);

        assert_eq!(shop.settings.price_modifier, 1.0);
        for tag in catalog.taxonomy(TaxonomyKind::ItemType).tags() {
            assert_eq!(shop.settings.category_modifiers.get(tag), Some(&1.0));
        }
        assert!(pools::FLAVOR_TEXTS.contains(&shop.settings.flavor_text.as_str()));
        assert_eq!(shop.system_filter, tags(&["Generic"]));
    }

    #[test]
    fn test_selector_from_raw() {
        assert_eq!(NpcSelector::from_raw("random"), NpcSelector::Random);
        assert_eq!(
            NpcSelector::from_raw("npc-1"),
            NpcSelector::Specific("npc-1".to_string())
        );
        assert_eq!(LocationSelector::from_raw(""), LocationSelector::Random);
        assert_eq!(
            LocationSelector::from_raw("Waterdeep"),
            LocationSelector::Named("Waterdeep".to_string())
        );
    }
}
