//! Driven port for item persistence.
//!
//! Mutating calls take the owner alongside the identifier so adapters can
//! scope the write to that owner. A `false` return means no row matched.

use async_trait::async_trait;

use crate::domain::{Item, ItemId, NewItem, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by item repository adapters.
    pub enum ItemPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "item repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetch an item by identifier regardless of owner.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemPersistenceError>;

    /// All items owned by `owner_id`, ascending by identifier.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Item>, ItemPersistenceError>;

    /// Insert a new item and return it with its assigned identifier.
    async fn insert(&self, item: &NewItem) -> Result<Item, ItemPersistenceError>;

    /// Persist the data and `updated_at` of an existing item, matching on both
    /// identifier and owner.
    async fn update(&self, item: &Item) -> Result<bool, ItemPersistenceError>;

    /// Remove the item with `id` owned by `owner_id`.
    async fn delete(&self, id: ItemId, owner_id: &UserId) -> Result<bool, ItemPersistenceError>;
}
