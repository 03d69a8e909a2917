//! `PgLinkStore` against a real database.
//!
//! `#[sqlx::test]` creates a fresh database per test from `DATABASE_URL` and
//! applies `migrations/`.

use link_service::domain::StoreError;
use link_service::domain::entities::NewLink;
use link_service::domain::repositories::LinkStore;
use link_service::infrastructure::persistence::PgLinkStore;
use sqlx::PgPool;
use std::sync::Arc;

const MAX: u64 = 10;

fn store(pool: PgPool) -> PgLinkStore {
    PgLinkStore::new(Arc::new(pool))
}

fn tagged(owner: &str, url: &str, tags: &[&str]) -> NewLink {
    let mut link = NewLink::new(owner, url, "title");
    link.tags = tags.iter().map(|t| t.to_string()).collect();
    link
}

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let store = store(pool);

    let created = store
        .create(tagged("alice", "https://example.com", &["rust", "db"]), MAX)
        .await
        .unwrap();
    assert_eq!(created.owner, "alice");
    assert_eq!(created.created_at, created.updated_at);

    let found = store
        .find("alice", "https://example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, created);
    assert!(found.has_tag("db"));

    assert!(store.find("bob", "https://example.com").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_duplicate_is_rejected(pool: PgPool) {
    let store = store(pool);

    store
        .create(NewLink::new("alice", "https://example.com", "a"), MAX)
        .await
        .unwrap();
    let err = store
        .create(NewLink::new("alice", "https://example.com", "b"), MAX)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Duplicate { .. }));

    // Same URL for a different owner is fine.
    store
        .create(NewLink::new("bob", "https://example.com", "b"), MAX)
        .await
        .unwrap();
}

#[sqlx::test]
async fn test_list_and_count_preserve_insertion_order(pool: PgPool) {
    let store = store(pool);

    for url in ["https://c.example", "https://a.example", "https://b.example"] {
        store.create(NewLink::new("alice", url, "t"), MAX).await.unwrap();
    }
    store
        .create(NewLink::new("bob", "https://z.example", "t"), MAX)
        .await
        .unwrap();

    let urls: Vec<String> = store
        .list_by_owner("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.url)
        .collect();
    assert_eq!(
        urls,
        vec!["https://c.example", "https://a.example", "https://b.example"]
    );
    assert_eq!(store.count_by_owner("alice").await.unwrap(), 3);
    assert_eq!(store.count_by_owner("nobody").await.unwrap(), 0);
}

#[sqlx::test]
async fn test_update_and_delete(pool: PgPool) {
    let store = store(pool);

    let mut link = store
        .create(tagged("alice", "https://example.com", &["old"]), MAX)
        .await
        .unwrap();
    link.title = "renamed".into();
    link.tags = ["new".to_string()].into_iter().collect();
    link.updated_at = chrono::Utc::now();

    let updated = store.update(link).await.unwrap().unwrap();
    assert_eq!(updated.title, "renamed");
    assert!(updated.has_tag("new"));
    assert!(!updated.has_tag("old"));

    assert!(store.delete("alice", "https://example.com").await.unwrap());
    assert!(!store.delete("alice", "https://example.com").await.unwrap());

    let missing = store
        .update(link_for("alice", "https://example.com"))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_quota_is_enforced_on_create(pool: PgPool) {
    let store = store(pool);

    store
        .create(NewLink::new("alice", "https://a.example", "a"), 1)
        .await
        .unwrap();
    let err = store
        .create(NewLink::new("alice", "https://b.example", "b"), 1)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StoreError::QuotaExceeded {
            owner: "alice".into(),
            max: 1
        }
    );
    assert_eq!(store.count_by_owner("alice").await.unwrap(), 1);
    assert!(
        store
            .find("alice", "https://b.example")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
async fn test_concurrent_creates_respect_quota(pool: PgPool) {
    let store = Arc::new(store(pool));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .create(NewLink::new("alice", format!("https://{i}.example"), "t"), 2)
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert!(matches!(err, StoreError::QuotaExceeded { max: 2, .. })),
        }
    }

    assert_eq!(created, 2);
    assert_eq!(store.count_by_owner("alice").await.unwrap(), 2);
}

#[sqlx::test]
async fn test_health_check(pool: PgPool) {
    assert!(store(pool).health_check().await);
}

fn link_for(owner: &str, url: &str) -> link_service::domain::entities::Link {
    link_service::domain::entities::Link::from_new(NewLink::new(owner, url, "t"), chrono::Utc::now())
}
