//! Helpers for classifying database errors.

/// Returns true if `e` is a unique violation of the `(owner, url)` constraint.
pub fn is_unique_violation_on_owner_url(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some("links_owner_url_key"))
}
