//! Owner extraction from HTTP request headers.

use crate::AppError;
use axum::http::HeaderMap;
use serde_json::json;

/// Header carrying the username every link operation acts on behalf of.
pub const OWNER_HEADER: &str = "x-username";

/// Extracts the link owner from the `X-Username` header.
///
/// Surrounding whitespace is trimmed. Whether the user actually exists is
/// decided later by the social graph, not here.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - The header is missing or blank
/// - The header value contains invalid UTF-8
pub fn extract_owner_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let owner = headers
        .get(OWNER_HEADER)
        .ok_or_else(|| {
            AppError::bad_request("Missing X-Username header", json!({ "header": OWNER_HEADER }))
        })?
        .to_str()
        .map_err(|_| {
            AppError::bad_request("Invalid X-Username header", json!({ "header": OWNER_HEADER }))
        })?
        .trim();

    if owner.is_empty() {
        return Err(AppError::bad_request(
            "Empty X-Username header",
            json!({ "header": OWNER_HEADER }),
        ));
    }

    Ok(owner.to_string())
}
