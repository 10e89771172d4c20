//! Item API handlers.
//!
//! ```text
//! GET    /item
//! POST   /item          data=...
//! PUT    /item/{id}     data=...
//! DELETE /item/{id}
//! ```
//!
//! `data` may arrive as a JSON body, a urlencoded form body or a query
//! parameter. Every handler resolves the caller from the session before
//! calling the item ports.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Item, ItemId, ItemValidationError, is_empty_data_error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::decode_body;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{EmptyDataResponse, HttpState};

/// Message returned when the `{id}` path segment is empty or unusable.
pub const NO_ID_MESSAGE: &str = "No id parameter";

/// Item as returned by `GET /item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    /// Item identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Opaque payload.
    #[schema(example = "very secure new item data")]
    pub data: String,
    /// RFC 3339 creation time.
    pub created_at: DateTime<Utc>,
    /// RFC 3339 time of the last update.
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id().get(),
            data: item.data().as_str().to_owned(),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        }
    }
}

/// Payload accepted by `POST /item` and `PUT /item/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemPayload {
    /// Opaque item content; must not be empty.
    #[serde(default)]
    pub data: Option<String>,
}

/// Pull `data` from the body, falling back to the query string.
fn extract_data(req: &HttpRequest, body: &[u8]) -> Result<String, Error> {
    let from_body: ItemPayload = decode_body(req, body)?;
    let data = match from_body.data {
        Some(data) => Some(data),
        None => web::Query::<ItemPayload>::from_query(req.query_string())
            .map_err(|err| Error::invalid_request(format!("malformed query string: {err}")))?
            .into_inner()
            .data,
    };
    Ok(data.unwrap_or_default())
}

fn invalid_id(raw: &str, err: ItemValidationError) -> Error {
    let code = match err {
        ItemValidationError::MissingId => "missing_id",
        _ => "invalid_id",
    };
    Error::invalid_request(NO_ID_MESSAGE).with_details(json!({
        "field": "id",
        "value": raw,
        "code": code,
    }))
}

fn parse_item_id(raw: &str) -> Result<ItemId, Error> {
    raw.parse::<ItemId>().map_err(|err| invalid_id(raw, err))
}

fn empty_body() -> HttpResponse {
    HttpResponse::Ok().json(json!({}))
}

/// Apply the configured empty-data policy to a mutation result.
fn respond(state: &HttpState, result: Result<(), Error>) -> ApiResult<HttpResponse> {
    match result {
        Ok(()) => Ok(empty_body()),
        Err(err)
            if state.empty_data_response == EmptyDataResponse::LegacyOk
                && is_empty_data_error(&err) =>
        {
            Ok(HttpResponse::Ok().json(err))
        }
        Err(err) => Err(err),
    }
}

/// List the caller's items, oldest first.
#[utoipa::path(
    get,
    path = "/item",
    responses(
        (status = 200, description = "Items owned by the caller", body = [ItemResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/item")]
pub async fn list_items(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ItemResponse>>> {
    let caller = session.require_user_id()?;
    let items = state.items_query.list_items(&caller).await?;
    Ok(web::Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Create an item owned by the caller.
#[utoipa::path(
    post,
    path = "/item",
    params(ItemPayload),
    request_body(content = ItemPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Item created"),
        (status = 400, description = "Missing or empty data", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["items"],
    operation_id = "createItem"
)]
#[post("/item")]
pub async fn create_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let data = extract_data(&req, &body)?;
    let result = state
        .items_command
        .create_item(&caller, data)
        .await
        .map(|_| ());
    respond(&state, result)
}

/// Replace the data of one of the caller's items.
#[utoipa::path(
    put,
    path = "/item/{id}",
    params(("id" = i64, Path, description = "Item identifier"), ItemPayload),
    request_body(content = ItemPayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Item updated"),
        (status = 400, description = "Invalid id or empty data", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller does not own the item", body = Error),
        (status = 404, description = "No item", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[put("/item/{id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let id = parse_item_id(&path.into_inner())?;
    let data = extract_data(&req, &body)?;
    let result = state
        .items_command
        .update_item(&caller, id, data)
        .await
        .map(|_| ());
    respond(&state, result)
}

/// Permanently delete one of the caller's items.
#[utoipa::path(
    delete,
    path = "/item/{id}",
    params(("id" = i64, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Caller does not own the item", body = Error),
        (status = 404, description = "No item", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[delete("/item/{id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let id = parse_item_id(&path.into_inner())?;
    state.items_command.delete_item(&caller, id).await?;
    Ok(empty_body())
}

/// `PUT /item/` with no id segment.
#[put("/item/")]
pub async fn update_item_without_id(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    Err(invalid_id("", ItemValidationError::MissingId))
}

/// `DELETE /item/` with no id segment.
#[delete("/item/")]
pub async fn delete_item_without_id(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    Err(invalid_id("", ItemValidationError::MissingId))
}

/// Register every `/item` route on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_items)
        .service(create_item)
        .service(update_item_without_id)
        .service(delete_item_without_id)
        .service(update_item)
        .service(delete_item);
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
