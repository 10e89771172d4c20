//! In-process adapters for development and tests.
//!
//! State lives behind `std::sync::RwLock` and disappears with the process.
//! A poisoned lock is reported as a query failure.

mod item_repository;
mod user_repository;

pub use item_repository::InMemoryItemRepository;
pub use user_repository::InMemoryUserRepository;
