//! Handlers for link endpoints.
//!
//! Every handler reads the owner from the `X-Username` header, validates the
//! request DTO and then calls the decorated [`LinkManager`](crate::application::services::LinkManager).
//! Domain errors are mapped to HTTP status codes by [`AppError`].

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
};
use validator::Validate;

use crate::api::dto::links::{
    AddLinkRequest, DeleteLinkQuery, GetLinksQuery, LinkResponse, LinksResponse,
    UpdateLinkRequest,
};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_owner::extract_owner_from_headers;

/// Lists the caller's links, optionally filtered.
///
/// # Endpoint
///
/// `GET /links?url_regex=&title_regex=&description_regex=&tag=`
///
/// Links are returned in insertion order.
///
/// # Errors
///
/// Returns 400 Bad Request if a filter expression does not compile.
pub async fn get_links_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<GetLinksQuery>,
) -> Result<Json<LinksResponse>, AppError> {
    let owner = extract_owner_from_headers(&headers)?;

    let links = state
        .link_manager
        .get_links(&owner, query.into())
        .await?;

    Ok(Json(LinksResponse {
        links: links.into_iter().map(LinkResponse::from).collect(),
    }))
}

/// Adds a link for the caller.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "title": "Example",
///   "description": "optional",
///   "tags": ["optional"]
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request: validation failure, unknown owner, or quota reached
/// - 409 Conflict: the caller already has a link with this URL
/// - 503 Service Unavailable: store or social graph unreachable
pub async fn add_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AddLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;
    let owner = extract_owner_from_headers(&headers)?;

    let link = state
        .link_manager
        .add_link(payload.into_new_link(owner))
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Partially updates one of the caller's links.
///
/// # Endpoint
///
/// `PUT /links`
///
/// # Request Body
///
/// `url` selects the link; all other fields are optional.
///
/// ```json
/// {
///   "url": "https://example.com",
///   "title": "New title",
///   "add_tags": ["rust"],
///   "remove_tags": ["draft"]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the caller has no link with this URL.
pub async fn update_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;
    let owner = extract_owner_from_headers(&headers)?;
    let (url, patch) = payload.into_parts();

    let link = state.link_manager.update_link(&owner, &url, patch).await?;

    Ok(Json(link.into()))
}

/// Deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /links?url=`
///
/// # Errors
///
/// Returns 404 Not Found if the caller has no link with this URL.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeleteLinkQuery>,
) -> Result<StatusCode, AppError> {
    query.validate()?;
    let owner = extract_owner_from_headers(&headers)?;

    state.link_manager.delete_link(&owner, &query.url).await?;

    Ok(StatusCode::NO_CONTENT)
}
