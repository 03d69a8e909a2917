//! API route configuration.
//!
//! Every link endpoint acts on behalf of the user named in the `X-Username`
//! header.

use crate::api::handlers::{
    add_link_handler, delete_link_handler, get_links_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link management routes.
///
/// # Endpoints
///
/// - `GET    /links`  - List the caller's links (regex and tag filters in the query)
/// - `POST   /links`  - Add a link
/// - `PUT    /links`  - Update a link selected by `url` in the body
/// - `DELETE /links`  - Delete a link selected by the `url` query parameter
pub fn link_routes() -> Router<AppState> {
    Router::new().route(
        "/links",
        get(get_links_handler)
            .post(add_link_handler)
            .put(update_link_handler)
            .delete(delete_link_handler),
    )
}
