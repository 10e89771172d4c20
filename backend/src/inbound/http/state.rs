//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see the driving ports, so
//! they can be exercised with in-memory adapters or mocks.

use std::sync::Arc;

use crate::domain::ports::{ItemsCommand, ItemsQuery, LoginService};

/// How `/item` answers a request whose `data` field is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyDataResponse {
    /// `400 Bad Request` with the error body.
    #[default]
    BadRequest,
    /// `200 OK` carrying the same error body, for clients built against the
    /// original service.
    LegacyOk,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check behind `/login`.
    pub login: Arc<dyn LoginService>,
    /// Read side of `/item`.
    pub items_query: Arc<dyn ItemsQuery>,
    /// Write side of `/item`.
    pub items_command: Arc<dyn ItemsCommand>,
    /// Status used when `data` is missing or empty.
    pub empty_data_response: EmptyDataResponse,
}

impl HttpState {
    /// Build state with the default empty-data policy.
    pub fn new(
        login: Arc<dyn LoginService>,
        items_query: Arc<dyn ItemsQuery>,
        items_command: Arc<dyn ItemsCommand>,
    ) -> Self {
        Self {
            login,
            items_query,
            items_command,
            empty_data_response: EmptyDataResponse::default(),
        }
    }

    /// Override the empty-data policy.
    pub fn with_empty_data_response(mut self, policy: EmptyDataResponse) -> Self {
        self.empty_data_response = policy;
        self
    }
}
