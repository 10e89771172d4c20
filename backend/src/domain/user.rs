//! User data model.
//!
//! Users are provisioned out of band and never change after creation. Each
//! one owns zero or more items.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PasswordHash;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Blank identifier.
    EmptyId,
    /// Identifier is not a UUID.
    InvalidId,
    /// Blank username.
    EmptyUsername,
    /// Username shorter than `min` characters.
    UsernameTooShort { min: usize },
    /// Username longer than `max` characters.
    UsernameTooLong { max: usize },
    /// Username outside `[A-Za-z0-9_.-]`.
    UsernameInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, dashes, or underscores",
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
///
/// # Examples
/// ```
/// use itembox::domain::UserId;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 64;

/// Login name, unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

impl Username {
    /// Validate and construct a [`Username`]. Surrounding whitespace is
    /// trimmed before checks run.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let username = username.as_ref().trim();
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username.chars().all(is_username_char) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(username.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application user with its stored credential.
///
/// ## Invariants
/// - `id` never changes once assigned.
/// - `username` is unique across all users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password digest.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
