pub mod city;
pub mod item;
pub mod npc;
pub mod seed;
pub mod store;
pub mod taxonomy;

pub use city::City;
pub use item::Item;
pub use npc::Npc;
pub use store::{CatalogStore, RulesPayload};
pub use taxonomy::{Taxonomy, TaxonomyKind};

/// Mint a fresh opaque id. Used for inventory copies, generated shops, and
/// imported records that arrive without an id.
pub(crate) fn mint_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
