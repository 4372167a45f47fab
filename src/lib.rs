//! Shopforge: procedural shop generation for tabletop RPGs.
//!
//! Maintains catalogs of items, NPCs and cities, assembles themed shops
//! from configurable rules (archetype and system filtering, weighted random
//! stock, price modulation, keeper/location assignment), and lets a host
//! application hand-edit, archive and export the result. Persistence is a
//! local injected key-value store; there is no server component.
//!
//! [`app::AppState`] is the composition root a host shell owns; the
//! generation engine itself is pure and lives in [`shop::generator`].

pub mod app;
pub mod catalog;
pub mod error;
pub mod export;
pub mod settings;
pub mod shop;
pub mod storage;

pub use app::AppState;
pub use catalog::{CatalogStore, City, Item, Npc, TaxonomyKind};
pub use error::{ImportError, StorageError, ValidationError};
pub use settings::{AppSettings, Language};
pub use shop::{
    GenerationRequest, LocationSelector, NpcSelector, Shop, ShopArchive, ShopSettings,
};
pub use storage::{FileStore, MemoryStore, StorageBackend};
