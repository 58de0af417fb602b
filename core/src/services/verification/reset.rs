//! Password-reset token flow.
//!
//! Deliberately asymmetric with the OTP flow: issuance is not rate-limited,
//! a wrong token neither counts attempts nor deletes the record, and a
//! successful verification leaves the token in place so the caller can
//! verify again when it actually commits the password change. The tokens
//! are 256-bit random, so the missing attempt limit is not a practical
//! brute-force surface; confirm with the product owner before unifying the
//! two flows.

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use tracing::{debug, info, warn};

use verimail_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::errors::{DomainResult, VerificationError};
use crate::domain::entities::VerificationRecord;

use super::config::VerificationServiceConfig;
use super::locks::KeyedLocks;
use super::service::recipient_name;
use super::traits::{EmailDispatcher, VerificationStore};
use super::types::SendResetResult;

/// Namespace prefix for reset-token records, so an in-flight email-change
/// OTP and a password reset for the same address never collide.
pub const RESET_KEY_PREFIX: &str = "reset_";

/// Service driving the password-reset token flow.
pub struct PasswordResetService<E: EmailDispatcher, S: VerificationStore> {
    mailer: Arc<E>,
    store: Arc<S>,
    locks: Arc<KeyedLocks>,
    config: VerificationServiceConfig,
}

impl<E: EmailDispatcher, S: VerificationStore> PasswordResetService<E, S> {
    pub fn new(
        mailer: Arc<E>,
        store: Arc<S>,
        locks: Arc<KeyedLocks>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            mailer,
            store,
            locks,
            config,
        }
    }

    /// Issue a fresh reset token and dispatch the reset link by email.
    ///
    /// Always overwrites any pending token for the address. As with the OTP
    /// flow, a dispatch failure is surfaced but the stored record stays.
    pub async fn send_reset_token(
        &self,
        email: &str,
        display_name_hint: Option<&str>,
    ) -> DomainResult<SendResetResult> {
        if !is_valid_email(email) {
            warn!(
                event = "reset_invalid_email",
                "Rejected reset request for malformed email"
            );
            return Err(VerificationError::InvalidEmail);
        }
        let normalized = normalize_email(email);
        let key = reset_key(&normalized);

        let guard = self.locks.acquire(&key).await;

        let swept = self
            .store
            .cleanup()
            .await
            .map_err(VerificationError::Store)?;
        if swept > 0 {
            debug!(swept, "Removed expired verification records before issuance");
        }

        let record = VerificationRecord::new_reset_token(self.config.reset_token_expiry_minutes);
        let token = record.secret.clone();
        let expires_at = record.expires_at;

        self.store
            .set(&key, record)
            .await
            .map_err(VerificationError::Store)?;
        drop(guard);

        info!(
            email = %mask_email(&normalized),
            event = "reset_token_generated",
            "Generated and stored new reset token"
        );

        self.mailer
            .send_reset_email(&normalized, &recipient_name(display_name_hint), &token)
            .await
            .map_err(|e| {
                warn!(
                    email = %mask_email(&normalized),
                    event = "reset_dispatch_failed",
                    error = %e,
                    "Failed to dispatch reset email"
                );
                VerificationError::DispatchFailed(e)
            })?;

        info!(
            email = %mask_email(&normalized),
            event = "reset_token_sent",
            "Reset email dispatched"
        );

        Ok(SendResetResult { expires_at })
    }

    /// Verify a submitted reset token without consuming it.
    ///
    /// An expired record is deleted on observation. On a match the record is
    /// left in place; deletion happens in [`Self::consume_reset_token`] once
    /// the password change is committed.
    pub async fn verify_reset_token(&self, email: &str, submitted_token: &str) -> DomainResult<()> {
        let normalized = normalize_email(email);
        let key = reset_key(&normalized);
        let token = submitted_token.trim();

        let _guard = self.locks.acquire(&key).await;

        let record = match self
            .store
            .get(&key)
            .await
            .map_err(VerificationError::Store)?
        {
            Some(record) => record,
            None => {
                debug!(
                    email = %mask_email(&normalized),
                    event = "reset_not_found",
                    "No pending reset token"
                );
                return Err(VerificationError::NotFound);
            }
        };

        if record.is_expired() {
            self.store
                .delete(&key)
                .await
                .map_err(VerificationError::Store)?;
            info!(
                email = %mask_email(&normalized),
                event = "reset_token_expired",
                "Reset token expired, record removed"
            );
            return Err(VerificationError::Expired);
        }

        if constant_time_eq(record.secret.as_bytes(), token.as_bytes()) {
            info!(
                email = %mask_email(&normalized),
                event = "reset_token_verified",
                "Reset token verified, record retained for commit"
            );
            return Ok(());
        }

        warn!(
            email = %mask_email(&normalized),
            event = "reset_token_mismatch",
            "Wrong reset token submitted"
        );
        Err(VerificationError::InvalidToken)
    }

    /// Delete the pending reset token for an address.
    ///
    /// Called by the password-change collaborator after the new password has
    /// actually been committed.
    pub async fn consume_reset_token(&self, email: &str) -> DomainResult<()> {
        let normalized = normalize_email(email);
        let key = reset_key(&normalized);

        let _guard = self.locks.acquire(&key).await;
        self.store
            .delete(&key)
            .await
            .map_err(VerificationError::Store)?;
        info!(
            email = %mask_email(&normalized),
            event = "reset_token_consumed",
            "Reset token removed after password change"
        );
        Ok(())
    }
}

/// Store key for a reset-token record.
fn reset_key(normalized_email: &str) -> String {
    format!("{}{}", RESET_KEY_PREFIX, normalized_email)
}
