//! Driving port for item mutations.
//!
//! Every operation receives the authenticated caller explicitly. Raw payload
//! strings are validated by the implementation so adapters stay thin.

use async_trait::async_trait;

use crate::domain::{Error, Item, ItemId, UserId};

/// Domain use-case port for creating, updating and deleting items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemsCommand: Send + Sync {
    /// Create an item owned by `caller`.
    async fn create_item(&self, caller: &UserId, data: String) -> Result<Item, Error>;

    /// Replace the payload of an item owned by `caller`.
    async fn update_item(&self, caller: &UserId, id: ItemId, data: String)
    -> Result<Item, Error>;

    /// Permanently remove an item owned by `caller`.
    async fn delete_item(&self, caller: &UserId, id: ItemId) -> Result<(), Error>;
}
