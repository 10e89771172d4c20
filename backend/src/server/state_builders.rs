//! Wires repositories and services into [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use itembox::domain::ports::{ItemRepository, UserRepository};
use itembox::domain::{DemoUserSeeder, DemoUserSeedingError, ItemService, PasswordLoginService};
use itembox::inbound::http::state::{EmptyDataResponse, HttpState};
use itembox::outbound::memory::{InMemoryItemRepository, InMemoryUserRepository};
use itembox::outbound::persistence::{DieselItemRepository, DieselUserRepository};

use super::ServerConfig;

fn wire<I, U>(items: Arc<I>, users: Arc<U>, policy: EmptyDataResponse) -> HttpState
where
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let item_service = Arc::new(ItemService::new(items, Arc::new(DefaultClock)));
    HttpState::new(
        Arc::new(PasswordLoginService::new(users)),
        item_service.clone(),
        item_service,
    )
    .with_empty_data_response(policy)
}

async fn seed<U: UserRepository>(users: Arc<U>) -> Result<(), DemoUserSeedingError> {
    let outcome = DemoUserSeeder::new(users).seed().await?;
    info!(
        created = outcome.created.len(),
        existing = outcome.existing.len(),
        "demo users seeded"
    );
    Ok(())
}

/// Build handler state for the configured storage, seeding demo users when
/// requested or when running in memory.
pub(super) async fn build_http_state(
    config: &ServerConfig,
) -> std::io::Result<web::Data<HttpState>> {
    let policy = config.empty_data_response;
    let state = match &config.db_pool {
        Some(pool) => {
            let users = Arc::new(DieselUserRepository::new(pool.clone()));
            if config.seed_demo_users {
                seed(users.clone()).await.map_err(std::io::Error::other)?;
            }
            wire(Arc::new(DieselItemRepository::new(pool.clone())), users, policy)
        }
        None => {
            let users = Arc::new(InMemoryUserRepository::new());
            seed(users.clone()).await.map_err(std::io::Error::other)?;
            wire(Arc::new(InMemoryItemRepository::new()), users, policy)
        }
    };
    Ok(web::Data::new(state))
}
