//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{items, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// Insertable struct for user upserts.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: i64,
    pub owner_id: Uuid,
    pub data: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new items; the sequence assigns `id`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow<'a> {
    pub owner_id: Uuid,
    pub data: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when an item's payload is revised.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = items)]
pub(crate) struct ItemUpdate<'a> {
    pub data: &'a str,
    pub updated_at: DateTime<Utc>,
}
