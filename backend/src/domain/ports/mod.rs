//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod item_repository;
mod items_command;
mod items_query;
mod login_service;
mod user_repository;

#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemPersistenceError, ItemRepository};
#[cfg(test)]
pub use items_command::MockItemsCommand;
pub use items_command::ItemsCommand;
#[cfg(test)]
pub use items_query::MockItemsQuery;
pub use items_query::ItemsQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
