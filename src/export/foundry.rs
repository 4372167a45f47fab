//! Virtual-Tabletop Export
//!
//! Serializes a shop as a Foundry-style actor record: the full shop rides
//! along under our flag namespace, and each inventory entry becomes an item
//! with its modified price baked in. Export reads, never mutates.

use serde::Serialize;

use crate::shop::definition::Shop;
use crate::shop::pricing::final_price;

#[derive(Debug, Serialize)]
pub struct FoundryActor<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub actor_type: &'static str,
    pub system: &'static str,
    pub flags: FoundryFlags<'a>,
    pub items: Vec<FoundryItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct FoundryFlags<'a> {
    pub shopforge: &'a Shop,
}

#[derive(Debug, Serialize)]
pub struct FoundryItem<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub item_type: String,
    pub system: FoundryItemSystem<'a>,
}

#[derive(Debug, Serialize)]
pub struct FoundryItemSystem<'a> {
    pub price: FoundryPrice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<&'a str>,
    pub rarity: &'a str,
}

#[derive(Debug, Serialize)]
pub struct FoundryPrice {
    pub value: i64,
}

/// Build the actor record for `shop`.
pub fn actor_record(shop: &Shop) -> FoundryActor<'_> {
    let items = shop
        .inventory
        .iter()
        .map(|item| FoundryItem {
            name: &item.name,
            item_type: item.item_type.to_lowercase(),
            system: FoundryItemSystem {
                price: FoundryPrice {
                    value: final_price(item, &shop.settings),
                },
                weight: item.weight.as_deref(),
                rarity: &item.rarity,
            },
        })
        .collect();

    FoundryActor {
        name: &shop.name,
        actor_type: "npc",
        system: "generic",
        flags: FoundryFlags { shopforge: shop },
        items,
    }
}

/// Pretty-printed actor JSON, ready to hand to a file download.
pub fn export_shop(shop: &Shop) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&actor_record(shop))
}

/// Download filename for an export: whitespace runs collapse to `_`.
pub fn suggested_filename(shop_name: &str, extension: &str) -> String {
    let stem: Vec<&str> = shop_name.split_whitespace().collect();
    format!("{}.{}", stem.join("_"), extension)
}
