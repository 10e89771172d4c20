//! itembox: session-authenticated CRUD over user-owned items.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
