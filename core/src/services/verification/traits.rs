//! Traits for email dispatch and verification-record storage

use async_trait::async_trait;

use crate::domain::entities::VerificationRecord;

/// Trait for the outbound email collaborator
///
/// Implementations are expected to build their own message bodies; the
/// flows only hand over the recipient, a display name, and the secret.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    /// Send an email-change verification code
    async fn send_otp_email(
        &self,
        to: &str,
        recipient_name: &str,
        code: &str,
    ) -> Result<(), String>;

    /// Send a password-reset message carrying the given token
    async fn send_reset_email(
        &self,
        to: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<(), String>;
}

/// Trait for the shared verification-record table
///
/// Keys are normalized email addresses, optionally namespaced by the flow.
/// `get` is a pure lookup: expiry is the caller's responsibility.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Insert or replace the record under `key`
    async fn set(&self, key: &str, record: VerificationRecord) -> Result<(), String>;

    /// Look up the record under `key`, without mutating or checking expiry
    async fn get(&self, key: &str) -> Result<Option<VerificationRecord>, String>;

    /// Remove the record under `key` if present
    async fn delete(&self, key: &str) -> Result<(), String>;

    /// Check whether a record exists under `key`
    async fn has(&self, key: &str) -> Result<bool, String>;

    /// Remove every record whose expiry has passed; returns the count removed
    async fn cleanup(&self) -> Result<usize, String>;
}
