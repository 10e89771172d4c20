//! Item lifecycle service.
//!
//! Implements [`ItemsQuery`] and [`ItemsCommand`] over an [`ItemRepository`].
//! Mutations fetch by id first, then apply [`Item::is_owned_by`], so a missing
//! item reports `not_found` before ownership is considered.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{ItemPersistenceError, ItemRepository, ItemsCommand, ItemsQuery};
use crate::domain::{Error, Item, ItemData, ItemId, ItemValidationError, NewItem, UserId};

/// Message returned when an item payload is missing or empty.
pub const NO_DATA_MESSAGE: &str = "No data parameter";
/// Message returned when an item does not exist.
pub const NO_ITEM_MESSAGE: &str = "No item";

/// Details attached to the empty-payload validation error.
pub fn empty_data_details() -> serde_json::Value {
    json!({ "field": "data", "code": "empty_data" })
}

/// True when `error` is the empty-payload validation failure.
pub fn is_empty_data_error(error: &Error) -> bool {
    error.details() == Some(&empty_data_details())
}

/// Item service implementing the item driving ports.
#[derive(Clone)]
pub struct ItemService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ItemService<R> {
    /// Create a new service over `repo`, stamping mutations with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> ItemService<R>
where
    R: ItemRepository,
{
    fn map_repository_error(error: ItemPersistenceError) -> Error {
        match error {
            ItemPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("item repository unavailable: {message}"))
            }
            ItemPersistenceError::Query { message } => {
                Error::internal(format!("item repository error: {message}"))
            }
        }
    }

    fn validate_data(data: String) -> Result<ItemData, Error> {
        ItemData::new(data).map_err(|err| match err {
            ItemValidationError::EmptyData => {
                Error::invalid_request(NO_DATA_MESSAGE).with_details(empty_data_details())
            }
            other => Error::invalid_request(other.to_string()),
        })
    }

    fn forbidden(id: ItemId) -> Error {
        Error::forbidden("Not the owner of this item").with_details(json!({ "id": id.get() }))
    }

    /// Fetch the item and apply the ownership predicate.
    async fn owned_item(&self, caller: &UserId, id: ItemId) -> Result<Item, Error> {
        let item = self
            .repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(NO_ITEM_MESSAGE))?;

        if !item.is_owned_by(caller) {
            debug!(item_id = %id, user_id = %caller, "ownership check failed");
            return Err(Self::forbidden(id));
        }
        Ok(item)
    }
}

#[async_trait]
impl<R> ItemsQuery for ItemService<R>
where
    R: ItemRepository,
{
    async fn list_items(&self, caller: &UserId) -> Result<Vec<Item>, Error> {
        self.repo
            .find_by_owner(caller)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> ItemsCommand for ItemService<R>
where
    R: ItemRepository,
{
    async fn create_item(&self, caller: &UserId, data: String) -> Result<Item, Error> {
        let data = Self::validate_data(data)?;
        let new_item = NewItem {
            owner_id: caller.clone(),
            data,
            created_at: self.clock.utc(),
        };

        let item = self
            .repo
            .insert(&new_item)
            .await
            .map_err(Self::map_repository_error)?;
        info!(item_id = %item.id(), user_id = %caller, "item created");
        Ok(item)
    }

    async fn update_item(
        &self,
        caller: &UserId,
        id: ItemId,
        data: String,
    ) -> Result<Item, Error> {
        let data = Self::validate_data(data)?;
        let mut item = self.owned_item(caller, id).await?;
        item.revise(data, self.clock.utc());

        let updated = self
            .repo
            .update(&item)
            .await
            .map_err(Self::map_repository_error)?;
        if !updated {
            // Removed between the read and the write.
            return Err(Error::not_found(NO_ITEM_MESSAGE));
        }
        info!(item_id = %id, user_id = %caller, "item updated");
        Ok(item)
    }

    async fn delete_item(&self, caller: &UserId, id: ItemId) -> Result<(), Error> {
        self.owned_item(caller, id).await?;

        let deleted = self
            .repo
            .delete(id, caller)
            .await
            .map_err(Self::map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(NO_ITEM_MESSAGE));
        }
        info!(item_id = %id, user_id = %caller, "item deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
