//! Application State
//!
//! The single process-wide aggregate. All collections live here, every
//! mutation funnels through a named method, and each mutation rewrites the
//! owning collection's storage key in full. Consumers only ever get
//! `&`-views or clones back, which keeps the copy-on-cross-boundary rule
//! intact.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::catalog::seed::SeedData;
use crate::catalog::{CatalogStore, City, Item, Npc, RulesPayload, Taxonomy, TaxonomyKind};
use crate::error::{ImportError, ValidationError};
use crate::settings::{AppSettings, Language};
use crate::shop::editor::{self, AppearancePatch, ItemPatch, NpcPatch};
use crate::shop::generator::{self, GenerationRequest};
use crate::shop::{Shop, ShopArchive};
use crate::storage::{StorageBackend, keys};

pub struct AppState<S: StorageBackend> {
    storage: S,
    catalog: CatalogStore,
    settings: AppSettings,
    archive: ShopArchive,
    /// The shop being displayed/edited right now. Deliberately not a
    /// persisted key: only the archive survives a restart, and replacing an
    /// unsaved shop discards it.
    current_shop: Option<Shop>,
}

impl<S: StorageBackend> AppState<S> {
    /// Read every persisted key once, falling back to the embedded seed
    /// dataset (or empty, for the archive) when a key is absent or
    /// unreadable.
    pub fn load(storage: S) -> Self {
        let seed = SeedData::load();

        let items: Vec<Item> = Self::read_key(&storage, keys::ITEMS).unwrap_or(seed.items);
        let npcs: Vec<Npc> = Self::read_key(&storage, keys::NPCS).unwrap_or(seed.npcs);
        let cities: Vec<City> = Self::read_key(&storage, keys::CITIES).unwrap_or(seed.cities);
        let shop_types: Taxonomy =
            Self::read_key(&storage, keys::SHOP_TYPES).unwrap_or(seed.shop_types);
        let item_types: Taxonomy =
            Self::read_key(&storage, keys::ITEM_TYPES).unwrap_or(seed.item_types);
        let systems: Taxonomy = Self::read_key(&storage, keys::SYSTEMS).unwrap_or(seed.systems);
        let rarities: Taxonomy = Self::read_key(&storage, keys::RARITIES).unwrap_or(seed.rarities);
        let settings: AppSettings =
            Self::read_key(&storage, keys::SETTINGS).unwrap_or_default();
        let archive: ShopArchive = Self::read_key(&storage, keys::SHOPS).unwrap_or_default();

        let catalog = CatalogStore::from_parts(
            items, npcs, cities, shop_types, item_types, systems, rarities,
        );
        info!(
            "Loaded {} item(s), {} NPC(s), {} city(ies), {} saved shop(s)",
            catalog.items().len(),
            catalog.npcs().len(),
            catalog.cities().len(),
            archive.len()
        );

        Self {
            storage,
            catalog,
            settings,
            archive,
            current_shop: None,
        }
    }

    fn read_key<T: DeserializeOwned>(storage: &S, key: &str) -> Option<T> {
        let raw = storage.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Stored '{}' is unreadable, using built-in defaults: {}", key, e);
                None
            }
        }
    }

    /// Best-effort full rewrite of one key; failures are logged, not fatal.
    fn persist<T: Serialize + ?Sized>(storage: &mut S, key: &str, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => {
                if let Err(e) = storage.write(key, &json) {
                    warn!("Failed to persist '{}': {}", key, e);
                }
            }
            Err(e) => warn!("Failed to serialize '{}' for persistence: {}", key, e),
        }
    }

    fn persist_items(&mut self) {
        Self::persist(&mut self.storage, keys::ITEMS, self.catalog.items());
    }

    fn persist_npcs(&mut self) {
        Self::persist(&mut self.storage, keys::NPCS, self.catalog.npcs());
    }

    fn persist_cities(&mut self) {
        Self::persist(&mut self.storage, keys::CITIES, self.catalog.cities());
    }

    fn persist_tags(&mut self, kind: TaxonomyKind) {
        let key = match kind {
            TaxonomyKind::ShopType => keys::SHOP_TYPES,
            TaxonomyKind::ItemType => keys::ITEM_TYPES,
            TaxonomyKind::System => keys::SYSTEMS,
            TaxonomyKind::Rarity => keys::RARITIES,
        };
        Self::persist(&mut self.storage, key, self.catalog.taxonomy(kind));
    }

    fn persist_shops(&mut self) {
        Self::persist(&mut self.storage, keys::SHOPS, &self.archive);
    }

    fn persist_settings(&mut self) {
        Self::persist(&mut self.storage, keys::SETTINGS, &self.settings);
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn archive(&self) -> &ShopArchive {
        &self.archive
    }

    pub fn current_shop(&self) -> Option<&Shop> {
        self.current_shop.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ========================================================================
    // Catalog mutations
    // ========================================================================

    pub fn add_item(&mut self, item: Item) {
        self.catalog.add_item(item);
        self.persist_items();
    }

    pub fn update_item(&mut self, item: Item) -> bool {
        let changed = self.catalog.update_item(item);
        if changed {
            self.persist_items();
        }
        changed
    }

    pub fn delete_item(&mut self, id: &str) -> bool {
        let changed = self.catalog.delete_item(id);
        if changed {
            self.persist_items();
        }
        changed
    }

    pub fn import_items_json(&mut self, payload: &str) -> Result<usize, ImportError> {
        let count = self.catalog.import_items_json(payload)?;
        self.persist_items();
        Ok(count)
    }

    pub fn add_npc(&mut self, npc: Npc) {
        self.catalog.add_npc(npc);
        self.persist_npcs();
    }

    pub fn update_npc(&mut self, npc: Npc) -> bool {
        let changed = self.catalog.update_npc(npc);
        if changed {
            self.persist_npcs();
        }
        changed
    }

    pub fn delete_npc(&mut self, id: &str) -> bool {
        let changed = self.catalog.delete_npc(id);
        if changed {
            self.persist_npcs();
        }
        changed
    }

    pub fn import_npcs_json(&mut self, payload: &str) -> Result<usize, ImportError> {
        let count = self.catalog.import_npcs_json(payload)?;
        self.persist_npcs();
        Ok(count)
    }

    pub fn add_city(&mut self, city: City) {
        self.catalog.add_city(city);
        self.persist_cities();
    }

    pub fn update_city(&mut self, city: City) -> bool {
        let changed = self.catalog.update_city(city);
        if changed {
            self.persist_cities();
        }
        changed
    }

    pub fn delete_city(&mut self, id: &str) -> bool {
        let changed = self.catalog.delete_city(id);
        if changed {
            self.persist_cities();
        }
        changed
    }

    pub fn import_cities_json(&mut self, payload: &str) -> Result<usize, ImportError> {
        let count = self.catalog.import_cities_json(payload)?;
        self.persist_cities();
        Ok(count)
    }

    pub fn add_tag(&mut self, kind: TaxonomyKind, tag: impl Into<String>) {
        self.catalog.add_tag(kind, tag);
        self.persist_tags(kind);
    }

    pub fn remove_tag(&mut self, kind: TaxonomyKind, tag: &str) {
        self.catalog.remove_tag(kind, tag);
        self.persist_tags(kind);
    }

    pub fn import_rules_json(&mut self, payload: &str) -> Result<(), ImportError> {
        let rules: RulesPayload = serde_json::from_str(payload)?;
        self.catalog.import_rules(&rules);
        if rules.shop_types.is_some() {
            self.persist_tags(TaxonomyKind::ShopType);
        }
        if rules.item_types.is_some() {
            self.persist_tags(TaxonomyKind::ItemType);
        }
        if rules.systems.is_some() {
            self.persist_tags(TaxonomyKind::System);
        }
        if rules.rarities.is_some() {
            self.persist_tags(TaxonomyKind::Rarity);
        }
        Ok(())
    }

    // ========================================================================
    // App settings
    // ========================================================================

    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
        self.persist_settings();
    }

    pub fn set_accent_colors(
        &mut self,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) {
        self.settings.primary_color = primary.into();
        self.settings.secondary_color = secondary.into();
        self.persist_settings();
    }

    // ========================================================================
    // Generation (the public entry point over the engine)
    // ========================================================================

    /// Validate the request, then replace the current shop with a freshly
    /// generated one. An unsaved current shop is discarded; accepted
    /// behavior, not a defect.
    pub fn generate_shop(&mut self, request: GenerationRequest) -> Result<&Shop, ValidationError> {
        request.validate()?;
        let shop = generator::generate_shop(&self.catalog, &request, &mut rand::thread_rng());
        info!(
            "Generated shop '{}' with {} item(s)",
            shop.name,
            shop.inventory.len()
        );
        Ok(self.current_shop.insert(shop))
    }

    // ========================================================================
    // Editing surface (every operation is a no-op without a current shop)
    // ========================================================================

    pub fn rename_shop(&mut self, name: impl Into<String>) {
        if let Some(shop) = self.current_shop.as_mut() {
            shop.name = name.into();
        }
    }

    pub fn set_shop_location(&mut self, location: Option<String>) {
        if let Some(shop) = self.current_shop.as_mut() {
            shop.location = location;
        }
    }

    pub fn set_price_modifier(&mut self, value: f64) {
        if let Some(shop) = self.current_shop.as_mut() {
            shop.settings.price_modifier = value;
        }
    }

    pub fn set_category_modifier(&mut self, item_type: &str, value: f64) {
        if let Some(shop) = self.current_shop.as_mut() {
            shop.settings
                .category_modifiers
                .insert(item_type.to_string(), value);
        }
    }

    pub fn toggle_barter(&mut self) {
        if let Some(shop) = self.current_shop.as_mut() {
            shop.settings.allow_barter = !shop.settings.allow_barter;
        }
    }

    pub fn add_item_to_shop(&mut self, item_id: &str) -> Result<bool, ValidationError> {
        match self.current_shop.as_mut() {
            Some(shop) => editor::add_catalog_item(shop, &self.catalog, item_id),
            None => Ok(false),
        }
    }

    pub fn remove_item_from_shop(&mut self, instance_id: &str) -> bool {
        match self.current_shop.as_mut() {
            Some(shop) => editor::remove_item(shop, instance_id),
            None => false,
        }
    }

    pub fn patch_shop_item(&mut self, instance_id: &str, patch: &ItemPatch) -> bool {
        match self.current_shop.as_mut() {
            Some(shop) => editor::patch_item(shop, instance_id, patch),
            None => false,
        }
    }

    /// Load a catalog NPC over the current keeper, replacing it wholesale.
    pub fn load_keeper(&mut self, npc_id: &str) -> bool {
        match self.current_shop.as_mut() {
            Some(shop) => editor::load_keeper(shop, &self.catalog, npc_id),
            None => false,
        }
    }

    pub fn patch_keeper(&mut self, patch: &NpcPatch) {
        if let Some(shop) = self.current_shop.as_mut() {
            patch.apply(&mut shop.npc);
        }
    }

    pub fn patch_appearance(&mut self, patch: &AppearancePatch) {
        if let Some(shop) = self.current_shop.as_mut() {
            editor::patch_appearance(shop, patch);
        }
    }

    pub fn clear_appearance(&mut self) {
        if let Some(shop) = self.current_shop.as_mut() {
            editor::clear_appearance(shop);
        }
    }

    /// Catalog items addable to the current shop: compatible with its
    /// system filter and matching the search term.
    pub fn compatible_items(&self, search: &str) -> Vec<&Item> {
        match &self.current_shop {
            Some(shop) => editor::compatible_items(shop, &self.catalog, search),
            None => Vec::new(),
        }
    }

    // ========================================================================
    // Archive
    // ========================================================================

    /// Snapshot the current shop into the archive (upsert by id).
    pub fn save_current_shop(&mut self) -> bool {
        match &self.current_shop {
            Some(shop) => {
                self.archive.save(shop.clone());
                self.persist_shops();
                true
            }
            None => false,
        }
    }

    /// Make an archived shop current. Edits to it stay out of the archive
    /// until the next save.
    pub fn load_shop(&mut self, id: &str) -> bool {
        match self.archive.get(id) {
            Some(shop) => {
                self.current_shop = Some(shop.clone());
                true
            }
            None => false,
        }
    }

    /// Delete an archived shop. When it is also the currently loaded one,
    /// the current pointer is cleared too.
    pub fn delete_shop(&mut self, id: &str) -> bool {
        let removed = self.archive.delete(id);
        if self.current_shop.as_ref().is_some_and(|s| s.id == id) {
            self.current_shop = None;
        }
        if removed {
            self.persist_shops();
        }
        removed
    }
}
