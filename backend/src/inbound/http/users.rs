//! Session login and logout.
//!
//! ```text
//! POST /login   username=john&password=maxsecure
//! POST /logout
//! ```

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::decode_body;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request accepted as JSON or as a urlencoded form.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Account name.
    #[serde(default)]
    #[schema(example = "john")]
    pub username: String,
    /// Plain-text password.
    #[serde(default)]
    #[schema(example = "maxsecure")]
    pub password: String,
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank username or password", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let payload: LoginRequest = decode_body(&req, &body)?;
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "user logged in");
    Ok(HttpResponse::Ok().json(json!({})))
}

/// Drop the caller's session.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(json!({}))
}
