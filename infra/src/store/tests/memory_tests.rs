use chrono::{Duration, Utc};

use verimail_core::domain::entities::VerificationRecord;
use verimail_core::services::verification::VerificationStore;

use crate::store::InMemoryVerificationStore;

fn record_expiring_in(secs: i64) -> VerificationRecord {
    VerificationRecord {
        secret: "123456".to_string(),
        expires_at: Utc::now() + Duration::seconds(secs),
        attempts: 0,
    }
}

#[tokio::test]
async fn test_set_get_round_trip() {
    let store = InMemoryVerificationStore::new();
    let record = record_expiring_in(600);

    store.set("user@example.com", record.clone()).await.unwrap();

    assert_eq!(store.get("user@example.com").await.unwrap(), Some(record));
    assert!(store.has("user@example.com").await.unwrap());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_set_replaces_existing_record() {
    let store = InMemoryVerificationStore::new();

    store
        .set("user@example.com", record_expiring_in(600))
        .await
        .unwrap();
    let replacement = VerificationRecord {
        secret: "654321".to_string(),
        ..record_expiring_in(600)
    };
    store
        .set("user@example.com", replacement.clone())
        .await
        .unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(
        store.get("user@example.com").await.unwrap().unwrap().secret,
        "654321"
    );
}

#[tokio::test]
async fn test_get_is_a_pure_lookup() {
    let store = InMemoryVerificationStore::new();
    // An already-expired record stays retrievable; expiry is the caller's call
    store
        .set("user@example.com", record_expiring_in(-10))
        .await
        .unwrap();

    assert!(store.get("user@example.com").await.unwrap().is_some());
    assert!(store.get("user@example.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = InMemoryVerificationStore::new();
    store
        .set("user@example.com", record_expiring_in(600))
        .await
        .unwrap();

    store.delete("user@example.com").await.unwrap();
    assert!(!store.has("user@example.com").await.unwrap());

    // Deleting a missing key is a no-op
    store.delete("user@example.com").await.unwrap();
    store.delete("never-existed").await.unwrap();
}

#[tokio::test]
async fn test_cleanup_removes_only_expired_entries() {
    let store = InMemoryVerificationStore::new();
    store.set("live@example.com", record_expiring_in(600)).await.unwrap();
    store.set("stale@example.com", record_expiring_in(-1)).await.unwrap();
    store
        .set("reset_stale@example.com", record_expiring_in(-30))
        .await
        .unwrap();

    let swept = store.cleanup().await.unwrap();

    assert_eq!(swept, 2);
    assert_eq!(store.len().await, 1);
    assert!(store.has("live@example.com").await.unwrap());
}

#[tokio::test]
async fn test_cleanup_on_empty_store() {
    let store = InMemoryVerificationStore::new();
    assert_eq!(store.cleanup().await.unwrap(), 0);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_clones_share_one_table() {
    let store = InMemoryVerificationStore::new();
    let clone = store.clone();

    store
        .set("user@example.com", record_expiring_in(600))
        .await
        .unwrap();

    assert!(clone.has("user@example.com").await.unwrap());
    clone.delete("user@example.com").await.unwrap();
    assert!(!store.has("user@example.com").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_writers_do_not_lose_entries() {
    let store = InMemoryVerificationStore::new();

    let mut handles = Vec::new();
    for i in 0..32 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .set(&format!("user{}@example.com", i), record_expiring_in(600))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len().await, 32);
}
