//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkStore;
use crate::utils::db_error::is_unique_violation_on_owner_url;

const LINK_COLUMNS: &str = "owner, url, title, description, tags, created_at, updated_at";

#[derive(Debug, FromRow)]
struct LinkRow {
    owner: String,
    url: String,
    title: String,
    description: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            owner: r.owner,
            url: r.url,
            title: r.title,
            description: r.description,
            tags: r.tags.into_iter().collect(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

/// PostgreSQL store for links.
///
/// Uniqueness of `(owner, url)` is enforced by the `links_owner_url_key`
/// constraint, so concurrent inserts of the same link surface as
/// [`StoreError::Duplicate`]. Creates for one owner take a transaction-scoped
/// advisory lock keyed on the owner, so the quota count and the insert cannot
/// interleave with another create. Listing orders by the serial `id`, which is
/// insertion order.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn create(&self, new_link: NewLink, max_links: u64) -> Result<Link, StoreError> {
        let tags: Vec<String> = new_link.tags.iter().cloned().collect();

        let mut tx = self.pool.begin().await.map_err(unavailable)?;

        // Serializes creates per owner until commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&new_link.owner)
            .execute(&mut *tx)
            .await
            .map_err(unavailable)?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE owner = $1")
            .bind(&new_link.owner)
            .fetch_one(&mut *tx)
            .await
            .map_err(unavailable)?;

        if count.max(0) as u64 >= max_links {
            tx.rollback().await.map_err(unavailable)?;
            return Err(StoreError::QuotaExceeded {
                owner: new_link.owner,
                max: max_links,
            });
        }

        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (owner, url, title, description, tags)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.owner)
        .bind(&new_link.url)
        .bind(&new_link.title)
        .bind(&new_link.description)
        .bind(tags)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation_on_owner_url(&e) {
                StoreError::Duplicate {
                    owner: new_link.owner.clone(),
                    url: new_link.url.clone(),
                }
            } else {
                unavailable(e)
            }
        })?;

        tx.commit().await.map_err(unavailable)?;
        Ok(row.into())
    }

    async fn find(&self, owner: &str, url: &str) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE owner = $1 AND url = $2"
        ))
        .bind(owner)
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(unavailable)?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Link>, StoreError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE owner = $1 ORDER BY id ASC"
        ))
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(unavailable)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn count_by_owner(&self, owner: &str) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE owner = $1")
            .bind(owner)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(unavailable)?;

        Ok(count.max(0) as u64)
    }

    async fn update(&self, link: Link) -> Result<Option<Link>, StoreError> {
        let tags: Vec<String> = link.tags.into_iter().collect();

        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE links
            SET title = $3, description = $4, tags = $5, updated_at = $6
            WHERE owner = $1 AND url = $2
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&link.owner)
        .bind(&link.url)
        .bind(&link.title)
        .bind(&link.description)
        .bind(tags)
        .bind(link.updated_at)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(unavailable)?;

        Ok(row.map(Link::from))
    }

    async fn delete(&self, owner: &str, url: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM links WHERE owner = $1 AND url = $2")
            .bind(owner)
            .bind(url)
            .execute(self.pool.as_ref())
            .await
            .map_err(unavailable)?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
