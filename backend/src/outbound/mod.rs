//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: lock-guarded maps used when no database is configured and in
//!   tests.
//!
//! Adapters translate between domain types and storage representations and
//! carry no business rules.

pub mod memory;
pub mod persistence;
