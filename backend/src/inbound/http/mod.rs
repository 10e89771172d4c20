//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod items;
mod payload;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register the session and item routes. Session middleware and
/// [`state::HttpState`] must be provided by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login).service(users::logout);
    items::configure(cfg);
}
