//! OpenAPI document for the HTTP API.
//!
//! Served through Swagger UI in debug builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::items::{ItemPayload, ItemResponse};
use crate::inbound::http::users::LoginRequest;

/// Registers the `session` cookie security scheme.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "itembox API",
        description = "Session-authenticated CRUD over items owned by each user."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Error, ErrorCode, ItemResponse, ItemPayload, LoginRequest)),
    tags(
        (name = "items", description = "Items owned by the logged-in user"),
        (name = "users", description = "Session login and logout"),
        (name = "health", description = "Probes for orchestrators")
    )
)]
pub struct ApiDoc;
