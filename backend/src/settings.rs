//! Application settings loaded via OrthoConfig.
//!
//! Values come from `ITEMBOX_*` environment variables, a config file or
//! command-line flags.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::state::EmptyDataResponse;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ITEMBOX")]
pub struct AppSettings {
    /// Listen address, `host:port`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the service keeps everything in memory.
    pub database_url: Option<String>,
    /// Insert the demo accounts on startup.
    #[ortho_config(default = false)]
    pub seed_demo_users: bool,
    /// Answer empty `data` with `200` and the error body.
    #[ortho_config(default = false)]
    pub legacy_empty_data_ok: bool,
}

impl AppSettings {
    /// Parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `bind_addr` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Database URL, ignoring a blank value.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Policy selected by `legacy_empty_data_ok`.
    pub fn empty_data_response(&self) -> EmptyDataResponse {
        if self.legacy_empty_data_ok {
            EmptyDataResponse::LegacyOk
        } else {
            EmptyDataResponse::BadRequest
        }
    }
}
