//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, plus the services that enforce item ownership. Nothing in here
//! depends on actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, Username, PasswordHash: identities and credentials.
//! - Item, ItemId, ItemData, NewItem: the owned item aggregate.
//! - ItemService, PasswordLoginService, DemoUserSeeder: use-case services.

pub mod auth;
pub mod demo_users;
pub mod error;
pub mod item;
pub mod item_service;
pub mod login_service;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::demo_users::{DEMO_USERS, DemoUserSeedOutcome, DemoUserSeeder, DemoUserSeedingError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::item::{Item, ItemData, ItemId, ItemValidationError, NewItem};
pub use self::item_service::{
    ItemService, NO_DATA_MESSAGE, NO_ITEM_MESSAGE, empty_data_details, is_empty_data_error,
};
pub use self::login_service::PasswordLoginService;
pub use self::password::{PasswordHash, PasswordHashError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username};
