//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows (`models.rs`) and domain types
//! and hold no business rules. Connections come from a `bb8` pool over
//! `diesel-async`.
//!
//! ```ignore
//! use itembox::outbound::persistence::{DbPool, DieselItemRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/itembox")).await?;
//! let items = DieselItemRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_item_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_item_repository::DieselItemRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
