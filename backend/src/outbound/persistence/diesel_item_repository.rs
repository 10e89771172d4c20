//! PostgreSQL-backed `ItemRepository` using Diesel.
//!
//! Updates and deletes filter on both `id` and `owner_id`, so a write can
//! never touch another user's row even if the caller skipped the ownership
//! check.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ItemPersistenceError, ItemRepository};
use crate::domain::{Item, ItemData, ItemId, NewItem, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ItemRow, ItemUpdate, NewItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::items;

/// Diesel-backed implementation of the item repository port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ItemPersistenceError {
    map_basic_pool_error(error, ItemPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ItemPersistenceError {
    map_basic_diesel_error(
        error,
        ItemPersistenceError::query,
        ItemPersistenceError::connection,
    )
}

/// Convert a row into a validated domain item.
fn row_to_item(row: ItemRow) -> Result<Item, ItemPersistenceError> {
    let ItemRow {
        id,
        owner_id,
        data,
        created_at,
        updated_at,
    } = row;

    let id = ItemId::new(id).map_err(|err| ItemPersistenceError::query(err.to_string()))?;
    let data = ItemData::new(data).map_err(|err| ItemPersistenceError::query(err.to_string()))?;
    Ok(Item::new(
        id,
        UserId::from(owner_id),
        data,
        created_at,
        updated_at,
    ))
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ItemRow> = items::table
            .find(id.get())
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_item).transpose()
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Item>, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ItemRow> = items::table
            .filter(items::owner_id.eq(owner_id.as_uuid()))
            .order(items::id.asc())
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn insert(&self, item: &NewItem) -> Result<Item, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewItemRow {
            owner_id: *item.owner_id.as_uuid(),
            data: item.data.as_str(),
            created_at: item.created_at,
            updated_at: item.created_at,
        };

        let row: ItemRow = diesel::insert_into(items::table)
            .values(&new_row)
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_item(row)
    }

    async fn update(&self, item: &Item) -> Result<bool, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = ItemUpdate {
            data: item.data().as_str(),
            updated_at: item.updated_at(),
        };

        let updated = diesel::update(
            items::table
                .filter(items::id.eq(item.id().get()))
                .filter(items::owner_id.eq(item.owner_id().as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(&self, id: ItemId, owner_id: &UserId) -> Result<bool, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            items::table
                .filter(items::id.eq(id.get()))
                .filter(items::owner_id.eq(owner_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(id: i64, data: &str) -> ItemRow {
        let now = Utc::now();
        ItemRow {
            id,
            owner_id: Uuid::new_v4(),
            data: data.to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn valid_rows_convert() {
        let source = row(5, "payload");
        let owner = source.owner_id;

        let item = row_to_item(source).expect("row converts");

        assert_eq!(item.id().get(), 5);
        assert_eq!(item.owner_id().as_uuid(), &owner);
        assert_eq!(item.data().as_str(), "payload");
    }

    #[rstest]
    #[case(row(0, "payload"))]
    #[case(row(3, ""))]
    fn corrupt_rows_are_query_errors(#[case] source: ItemRow) {
        let err = row_to_item(source).expect_err("corrupt row rejected");
        assert!(matches!(err, ItemPersistenceError::Query { .. }));
    }
}
