use std::collections::BTreeSet;

use catalog::{Catalog, Location};
use foundation::LocationId;
use serde::{Deserialize, Serialize};

use crate::item::CartItem;
use crate::storage::{CartStorage, DEFAULT_STORAGE_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Session storage key holding the serialized cart.
    pub storage_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The id was already in the cart; nothing changed.
    Duplicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added(CartItem),
    Removed(CartItem),
    /// The id is neither in the cart nor in the catalog.
    Unknown,
}

/// The visitor's selection of locations, persisted after every change.
///
/// Ordering contract: items keep insertion order; ids are unique.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    items: Vec<CartItem>,
    storage: S,
    key: String,
}

impl<S: CartStorage> CartStore<S> {
    /// Empty cart, storage untouched.
    pub fn new(storage: S, config: &CartConfig) -> Self {
        Self {
            items: Vec::new(),
            storage,
            key: config.storage_key.clone(),
        }
    }

    /// Cart restored from storage. Absent, blank or malformed content yields
    /// an empty cart; it never fails.
    pub fn hydrate(storage: S, config: &CartConfig) -> Self {
        let mut store = Self::new(storage, config);
        store.items = store.read_persisted();
        store
    }

    fn read_persisted(&self) -> Vec<CartItem> {
        let raw = match self.storage.load(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(%err, "cart storage unreadable, starting empty");
                return Vec::new();
            }
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }
        let mut items = match serde_json::from_str::<Vec<CartItem>>(&raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(%err, "persisted cart is corrupt, starting empty");
                return Vec::new();
            }
        };
        let mut seen = BTreeSet::new();
        let before = items.len();
        items.retain(|item| item.id.is_valid() && seen.insert(item.id));
        if items.len() != before {
            tracing::warn!(
                dropped = before - items.len(),
                "persisted cart had duplicate or invalid ids"
            );
        }
        items
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn get(&self, id: LocationId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn ids(&self) -> Vec<LocationId> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add(&mut self, location: &Location) -> AddOutcome {
        if self.contains(location.id) {
            return AddOutcome::Duplicate;
        }
        self.items.push(CartItem::from(location));
        self.persist();
        AddOutcome::Added
    }

    /// Removes `id`; returns the removed item. Absent ids are a no-op.
    pub fn remove(&mut self, id: LocationId) -> Option<CartItem> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(pos);
        self.persist();
        Some(removed)
    }

    pub fn toggle(&mut self, id: LocationId, catalog: &Catalog) -> ToggleOutcome {
        if let Some(removed) = self.remove(id) {
            return ToggleOutcome::Removed(removed);
        }
        let Some(location) = catalog.get(id) else {
            return ToggleOutcome::Unknown;
        };
        let item = CartItem::from(location);
        self.items.push(item.clone());
        self.persist();
        ToggleOutcome::Added(item)
    }

    /// Empties the cart and persists `[]`. Returns `false` (and writes
    /// nothing) when it was already empty.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        self.persist();
        true
    }

    /// Empties the cart and persists `[]` even if it was already empty.
    pub fn reset(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn persist(&mut self) {
        let raw = match serde_json::to_string(&self.items) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(%err, "cart serialization failed");
                return;
            }
        };
        if let Err(err) = self.storage.save(&self.key, &raw) {
            // The in-memory cart stays authoritative for this page.
            tracing::warn!(%err, "cart persistence failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AddOutcome, CartConfig, CartStore, ToggleOutcome};
    use crate::item::CartItem;
    use crate::storage::{CartStorage, CartStorageError, InMemoryCartStorage};
    use catalog::{Catalog, Location};
    use foundation::LocationId;
    use i18n::Locale;
    use pretty_assertions::assert_eq;

    fn loc(id: u32, name: &str) -> Location {
        Location {
            id: LocationId(id),
            lat: 46.8 + id as f64 * 0.01,
            lng: -71.2,
            name: name.to_string(),
            visitors: format!("{id},000/month"),
            description: String::new(),
            facing_to: String::new(),
            google_maps_url: None,
            image_url: None,
        }
    }

    fn small_catalog() -> Catalog {
        Catalog::new(
            Locale::En,
            vec![loc(1, "One"), loc(2, "Two"), loc(3, "Three")],
        )
        .unwrap()
    }

    fn store() -> CartStore<InMemoryCartStorage> {
        CartStore::new(InMemoryCartStorage::new(), &CartConfig::default())
    }

    #[test]
    fn add_keeps_insertion_order_and_rejects_duplicates() {
        let c = small_catalog();
        let mut s = store();
        assert_eq!(s.add(c.get(LocationId(3)).unwrap()), AddOutcome::Added);
        assert_eq!(s.add(c.get(LocationId(1)).unwrap()), AddOutcome::Added);
        for _ in 0..5 {
            assert_eq!(s.add(c.get(LocationId(1)).unwrap()), AddOutcome::Duplicate);
        }
        assert_eq!(s.ids(), vec![LocationId(3), LocationId(1)]);
    }

    #[test]
    fn toggle_twice_restores_previous_cart() {
        let c = small_catalog();
        let mut s = store();
        s.add(c.get(LocationId(1)).unwrap());
        s.add(c.get(LocationId(3)).unwrap());
        let before = s.items().to_vec();

        assert!(matches!(s.toggle(LocationId(2), &c), ToggleOutcome::Added(_)));
        assert!(matches!(s.toggle(LocationId(2), &c), ToggleOutcome::Removed(_)));
        assert_eq!(s.items(), before.as_slice());
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let c = small_catalog();
        let mut s = store();
        assert_eq!(s.toggle(LocationId(99), &c), ToggleOutcome::Unknown);
        assert!(s.is_empty());
        assert_eq!(s.storage().writes(), 0);
    }

    #[test]
    fn remove_absent_is_noop_without_write() {
        let mut s = store();
        assert_eq!(s.remove(LocationId(4)), None);
        assert_eq!(s.storage().writes(), 0);
    }

    #[test]
    fn every_mutation_is_persisted() {
        let c = small_catalog();
        let mut s = store();
        s.add(c.get(LocationId(2)).unwrap());
        let raw = s.storage().raw("xtranumerik_cart").unwrap().to_string();
        let items: Vec<CartItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(items.len(), 1);
        assert!(raw.contains("\"visitors\":\"2,000/month\""));

        s.toggle(LocationId(2), &c);
        assert_eq!(s.storage().raw("xtranumerik_cart"), Some("[]"));
        assert_eq!(s.storage().writes(), 2);
    }

    #[test]
    fn persist_then_hydrate_round_trips_in_order() {
        let c = small_catalog();
        let mut s = store();
        for id in [2, 3, 1] {
            s.add(c.get(LocationId(id)).unwrap());
        }
        let original = s.items().to_vec();
        let storage = s.storage().clone();

        let restored = CartStore::hydrate(storage, &CartConfig::default());
        assert_eq!(restored.items(), original.as_slice());
    }

    #[test]
    fn cart_items_are_snapshots() {
        let mut s = store();
        let mut l = loc(5, "Gym X");
        s.add(&l);
        l.name = "Renamed".to_string();
        assert_eq!(s.get(LocationId(5)).unwrap().name, "Gym X");
    }

    #[test]
    fn corrupt_or_blank_storage_hydrates_empty() {
        for raw in ["", "   ", "not json", "{\"id\":1}", "[{\"id\":\"x\"}]"] {
            let storage = InMemoryCartStorage::with_entry("xtranumerik_cart", raw);
            let s = CartStore::hydrate(storage, &CartConfig::default());
            assert!(s.is_empty(), "{raw:?}");
        }
    }

    #[test]
    fn hydrate_drops_duplicate_ids() {
        let raw = r#"[{"id":1,"name":"A","visitors":"v"},{"id":1,"name":"B","visitors":"v"},{"id":2,"name":"C","visitors":"v"}]"#;
        let storage = InMemoryCartStorage::with_entry("xtranumerik_cart", raw);
        let s = CartStore::hydrate(storage, &CartConfig::default());
        assert_eq!(s.ids(), vec![LocationId(1), LocationId(2)]);
        assert_eq!(s.get(LocationId(1)).unwrap().name, "A");
    }

    #[test]
    fn clear_on_empty_cart_writes_nothing() {
        let mut s = store();
        assert!(!s.clear());
        assert_eq!(s.storage().writes(), 0);

        s.reset();
        assert_eq!(s.storage().raw("xtranumerik_cart"), Some("[]"));
        assert_eq!(s.storage().writes(), 1);
    }

    struct FailingStorage;

    impl CartStorage for FailingStorage {
        fn load(&self, _key: &str) -> Result<Option<String>, CartStorageError> {
            Err(CartStorageError::Io("boom".to_string()))
        }
        fn save(&mut self, _key: &str, _raw: &str) -> Result<(), CartStorageError> {
            Err(CartStorageError::Io("boom".to_string()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), CartStorageError> {
            Err(CartStorageError::Io("boom".to_string()))
        }
    }

    #[test]
    fn storage_failures_keep_memory_authoritative() {
        let c = small_catalog();
        let mut s = CartStore::hydrate(FailingStorage, &CartConfig::default());
        assert!(s.is_empty());
        s.add(c.get(LocationId(1)).unwrap());
        assert_eq!(s.ids(), vec![LocationId(1)]);
    }
}
