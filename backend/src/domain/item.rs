//! Item aggregate.
//!
//! An item is an opaque string payload owned by exactly one user. The owner
//! is fixed at creation; only the payload and `updated_at` ever change.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Validation errors for item primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemValidationError {
    /// The `{id}` segment was empty.
    #[error("item id must be provided")]
    MissingId,
    /// The `{id}` segment is not a positive integer.
    #[error("item id must be a positive integer")]
    InvalidId,
    /// `data` was missing or empty.
    #[error("item data must not be empty")]
    EmptyData,
}

/// Store-assigned item identifier. Always positive.
///
/// # Examples
/// ```
/// use itembox::domain::ItemId;
///
/// let id: ItemId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert!("0".parse::<ItemId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ItemId(i64);

impl ItemId {
    /// Wrap a positive identifier.
    ///
    /// # Errors
    ///
    /// [`ItemValidationError::InvalidId`] for zero or negative values.
    pub fn new(value: i64) -> Result<Self, ItemValidationError> {
        if value <= 0 {
            return Err(ItemValidationError::InvalidId);
        }
        Ok(Self(value))
    }

    /// Raw identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for ItemId {
    type Err = ItemValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ItemValidationError::MissingId);
        }
        let value = s.parse::<i64>().map_err(|_| ItemValidationError::InvalidId)?;
        Self::new(value)
    }
}

impl TryFrom<i64> for ItemId {
    type Error = ItemValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for i64 {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque item payload. Must not be the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemData(String);

impl ItemData {
    /// Accept any non-empty payload, whitespace included.
    ///
    /// # Errors
    ///
    /// [`ItemValidationError::EmptyData`] for the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, ItemValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ItemValidationError::EmptyData);
        }
        Ok(Self(value))
    }

    /// Borrow the payload.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ItemData {
    type Error = ItemValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemData> for String {
    fn from(value: ItemData) -> Self {
        value.0
    }
}

/// Persisted item.
///
/// ## Invariants
/// - `owner_id` never changes.
/// - `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    owner_id: UserId,
    data: ItemData,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Item {
    /// Rehydrate an item from storage.
    pub fn new(
        id: ItemId,
        owner_id: UserId,
        data: ItemData,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            data,
            created_at,
            updated_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// User that created the item.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Current payload.
    pub fn data(&self) -> &ItemData {
        &self.data
    }

    /// Creation time, fixed for the item's lifetime.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last accepted revision.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Single ownership predicate used by every mutating operation.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Replace the payload. `updated_at` never moves backwards, even if the
    /// clock does.
    pub fn revise(&mut self, data: ItemData, now: DateTime<Utc>) {
        self.data = data;
        self.updated_at = now.max(self.updated_at);
    }
}

/// Item awaiting insertion; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    /// Creating user.
    pub owner_id: UserId,
    /// Initial payload.
    pub data: ItemData,
    /// Creation time; also the initial `updated_at`.
    pub created_at: DateTime<Utc>,
}
