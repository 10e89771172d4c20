//! Driving port for reading a caller's items.

use async_trait::async_trait;

use crate::domain::{Error, Item, UserId};

/// Domain use-case port for listing items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemsQuery: Send + Sync {
    /// Every item owned by `caller`, oldest first. Empty when none exist.
    async fn list_items(&self, caller: &UserId) -> Result<Vec<Item>, Error>;
}
