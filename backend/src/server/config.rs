//! Server configuration assembled by `main`.

use std::net::SocketAddr;

use actix_web::cookie::Key;
use itembox::inbound::http::state::EmptyDataResponse;
use itembox::outbound::persistence::DbPool;

/// Everything [`super::create_server`] needs besides health state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_demo_users: bool,
    pub(crate) empty_data_response: EmptyDataResponse,
}

impl ServerConfig {
    /// In-memory configuration; attach a pool with [`Self::with_db_pool`].
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            db_pool: None,
            seed_demo_users: false,
            empty_data_response: EmptyDataResponse::default(),
        }
    }

    /// Use PostgreSQL instead of the in-memory stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed demo users into the database. In-memory mode always seeds.
    #[must_use]
    pub fn with_seed_demo_users(mut self, seed: bool) -> Self {
        self.seed_demo_users = seed;
        self
    }

    /// Status policy for empty item data.
    #[must_use]
    pub fn with_empty_data_response(mut self, policy: EmptyDataResponse) -> Self {
        self.empty_data_response = policy;
        self
    }
}
