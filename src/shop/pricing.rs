use crate::catalog::Item;

use super::definition::ShopSettings;

/// Displayed/exported price of an inventory entry, computed at read time
/// and never baked back into the item.
///
/// Rounding is always up, so a modified price never undercuts the nominal
/// catalog price once the combined modifier is at or above 1.0.
pub fn final_price(item: &Item, settings: &ShopSettings) -> i64 {
    let modifier = settings.price_modifier * settings.category_modifier(&item.item_type);
    (item.price * modifier).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn item(price: f64, item_type: &str) -> Item {
        Item {
            id: "itm-1".to_string(),
            name: "Test".to_string(),
            price,
            currency: "gp".to_string(),
            weight: None,
            rarity: "Common".to_string(),
            item_type: item_type.to_string(),
            system: "Generic".to_string(),
            description: None,
        }
    }

    fn settings(price_modifier: f64, category: &[(&str, f64)]) -> ShopSettings {
        let category_modifiers: HashMap<String, f64> = category
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        ShopSettings {
            price_modifier,
            category_modifiers,
            allow_barter: false,
            flavor_text: String::new(),
        }
    }

    #[test]
    fn test_rounds_up_not_nearest() {
        // 10 * 1.15 * 1.0 = 11.5 -> 12
        let price = final_price(&item(10.0, "Weapon"), &settings(1.15, &[("Weapon", 1.0)]));
        assert_eq!(price, 12);
    }

    #[test]
    fn test_exact_products_stay_exact() {
        let price = final_price(&item(10.0, "Weapon"), &settings(1.5, &[]));
        assert_eq!(price, 15);
    }

    #[test]
    fn test_missing_category_defaults_to_one() {
        let price = final_price(&item(40.0, "Potion"), &settings(1.0, &[("Weapon", 2.0)]));
        assert_eq!(price, 40);
    }

    #[test]
    fn test_category_stacks_with_global() {
        // 20 * 1.2 * 0.5 = 12
        let price = final_price(&item(20.0, "Potion"), &settings(1.2, &[("Potion", 0.5)]));
        assert_eq!(price, 12);
        // 20 * 1.1 * 1.3 = 28.6 -> 29
        let price = final_price(&item(20.0, "Potion"), &settings(1.1, &[("Potion", 1.3)]));
        assert_eq!(price, 29);
    }
}
