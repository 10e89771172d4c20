//! In-memory `ItemRepository`.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{ItemPersistenceError, ItemRepository};
use crate::domain::{Item, ItemId, NewItem, UserId};

#[derive(Debug)]
struct ItemStore {
    rows: BTreeMap<ItemId, Item>,
    last_id: i64,
}

/// Item repository backed by an ordered map.
///
/// Identifiers come from a counter that only moves forward, so a deleted id
/// is never handed out again.
#[derive(Debug, Clone)]
pub struct InMemoryItemRepository {
    store: Arc<RwLock<ItemStore>>,
}

impl InMemoryItemRepository {
    /// Empty repository; the first insert gets id 1.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(ItemStore {
                rows: BTreeMap::new(),
                last_id: 0,
            })),
        }
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(error: E) -> ItemPersistenceError {
    ItemPersistenceError::query(format!("item store lock poisoned: {error}"))
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemPersistenceError> {
        let store = self.store.read().map_err(poisoned)?;
        Ok(store.rows.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Item>, ItemPersistenceError> {
        let store = self.store.read().map_err(poisoned)?;
        Ok(store
            .rows
            .values()
            .filter(|item| item.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    async fn insert(&self, item: &NewItem) -> Result<Item, ItemPersistenceError> {
        let mut store = self.store.write().map_err(poisoned)?;
        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| ItemPersistenceError::query("item id sequence exhausted"))?;
        let id = ItemId::new(next).map_err(|err| ItemPersistenceError::query(err.to_string()))?;
        store.last_id = next;

        let stored = Item::new(
            id,
            item.owner_id.clone(),
            item.data.clone(),
            item.created_at,
            item.created_at,
        );
        store.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, item: &Item) -> Result<bool, ItemPersistenceError> {
        let mut store = self.store.write().map_err(poisoned)?;
        match store.rows.get_mut(&item.id()) {
            Some(existing) if existing.is_owned_by(item.owner_id()) => {
                existing.revise(item.data().clone(), item.updated_at());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: ItemId, owner_id: &UserId) -> Result<bool, ItemPersistenceError> {
        let mut store = self.store.write().map_err(poisoned)?;
        let owned = store
            .rows
            .get(&id)
            .is_some_and(|item| item.is_owned_by(owner_id));
        if owned {
            store.rows.remove(&id);
        }
        Ok(owned)
    }
}
