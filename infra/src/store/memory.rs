//! In-memory verification record store.
//!
//! A process-lifetime table shared by every in-flight request. Entries are
//! created or replaced by issuance and removed by verification success,
//! expiry observation, attempt exhaustion, or the cleanup sweep; nothing is
//! persisted across restarts.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use verimail_core::domain::entities::VerificationRecord;
use verimail_core::services::verification::VerificationStore;
use verimail_shared::utils::email::mask_email;

/// Shared in-memory verification table.
///
/// Cloning is cheap and every clone sees the same table. Individual
/// operations are safe under concurrency; multi-step sequences are
/// serialized per key by the flow services.
#[derive(Clone, Default)]
pub struct InMemoryVerificationStore {
    records: Arc<RwLock<HashMap<String, VerificationRecord>>>,
}

impl InMemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries (expired-but-unswept ones included)
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationStore for InMemoryVerificationStore {
    async fn set(&self, key: &str, record: VerificationRecord) -> Result<(), String> {
        let mut records = self.records.write().await;
        records.insert(key.to_string(), record);
        debug!(
            key = %mask_email(key),
            total = records.len(),
            "Stored verification record"
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<VerificationRecord>, String> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let mut records = self.records.write().await;
        if records.remove(key).is_some() {
            debug!(
                key = %mask_email(key),
                remaining = records.len(),
                "Deleted verification record"
            );
        }
        Ok(())
    }

    async fn has(&self, key: &str) -> Result<bool, String> {
        Ok(self.records.read().await.contains_key(key))
    }

    async fn cleanup(&self) -> Result<usize, String> {
        let mut records = self.records.write().await;
        let before = records.len();
        let now = Utc::now();
        records.retain(|_, record| record.expires_at >= now);
        let swept = before - records.len();
        if swept > 0 {
            info!(swept, remaining = records.len(), "Swept expired verification records");
        }
        Ok(swept)
    }
}
