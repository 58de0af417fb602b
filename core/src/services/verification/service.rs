//! OTP flow for email-change verification.

use std::sync::Arc;

use chrono::Duration;
use constant_time_eq::constant_time_eq;
use tracing::{debug, info, warn};

use verimail_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::errors::{DomainResult, VerificationError};
use crate::domain::entities::VerificationRecord;

use super::config::VerificationServiceConfig;
use super::locks::KeyedLocks;
use super::traits::{EmailDispatcher, VerificationStore};
use super::types::SendOtpResult;

/// Service driving the email-change OTP flow.
///
/// Per identifier, a pending code moves through issue, zero or more failed
/// attempts, and then consumption, expiry, or lockout. All read-modify-write
/// sequences for one identifier are serialized through [`KeyedLocks`].
pub struct OtpService<E: EmailDispatcher, S: VerificationStore> {
    mailer: Arc<E>,
    store: Arc<S>,
    locks: Arc<KeyedLocks>,
    config: VerificationServiceConfig,
}

impl<E: EmailDispatcher, S: VerificationStore> OtpService<E, S> {
    /// Create a new OTP service.
    ///
    /// The lock registry is shared with the reset service so that flows
    /// touching the same store serialize consistently.
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

    /// Issue a fresh OTP for an email-change request and dispatch it.
    ///
    /// Rejects with [`VerificationError::RateLimited`] while a previous code
    /// still has more than the resend-guard window of validity left.
    /// Expired entries are swept before the new record is stored. A dispatch
    /// failure surfaces as an error, but the stored record is not rolled
    /// back: the next issuance overwrites it.
    pub async fn send_otp(
        &self,
        email: &str,
        display_name_hint: Option<&str>,
    ) -> DomainResult<SendOtpResult> {
        if !is_valid_email(email) {
            warn!(event = "otp_invalid_email", "Rejected OTP request for malformed email");
            return Err(VerificationError::InvalidEmail);
        }
        let key = normalize_email(email);

        let guard = self.locks.acquire(&key).await;

        if let Some(existing) = self
            .store
            .get(&key)
            .await
            .map_err(VerificationError::Store)?
        {
            let remaining = existing.time_until_expiry();
            if remaining > Duration::seconds(self.config.resend_guard_seconds) {
                warn!(
                    email = %mask_email(&key),
                    remaining_secs = remaining.num_seconds(),
                    event = "otp_rate_limited",
                    "OTP reissue rejected, previous code still valid"
                );
                return Err(VerificationError::RateLimited {
                    retry_after_secs: remaining.num_seconds(),
                });
            }
        }

        let swept = self
            .store
            .cleanup()
            .await
            .map_err(VerificationError::Store)?;
        if swept > 0 {
            debug!(swept, "Removed expired verification records before issuance");
        }

        let record = VerificationRecord::new_otp(self.config.otp_expiry_minutes);
        let code = record.secret.clone();
        let expires_at = record.expires_at;

        self.store
            .set(&key, record)
            .await
            .map_err(VerificationError::Store)?;
        drop(guard);

        info!(
            email = %mask_email(&key),
            event = "otp_generated",
            "Generated and stored new OTP"
        );

        self.mailer
            .send_otp_email(&key, &recipient_name(display_name_hint), &code)
            .await
            .map_err(|e| {
                warn!(
                    email = %mask_email(&key),
                    event = "otp_dispatch_failed",
                    error = %e,
                    "Failed to dispatch OTP email"
                );
                VerificationError::DispatchFailed(e)
            })?;

        info!(email = %mask_email(&key), event = "otp_sent", "OTP email dispatched");

        Ok(SendOtpResult {
            expires_at,
            resend_available_at: expires_at
                - Duration::seconds(self.config.resend_guard_seconds),
        })
    }

    /// Verify a submitted OTP.
    ///
    /// `keep_code` supports the two-phase UI: a successful verification with
    /// `keep_code = true` leaves the record (and its attempt counter) in
    /// place for a final consuming verification later. An expired record is
    /// deleted on observation; the lockout fires, and deletes the record, on
    /// the fifth wrong attempt.
    pub async fn verify_otp(
        &self,
        email: &str,
        submitted_code: &str,
        keep_code: bool,
    ) -> DomainResult<()> {
        let key = normalize_email(email);
        let code = submitted_code.trim();

        let _guard = self.locks.acquire(&key).await;

        let record = match self
            .store
            .get(&key)
            .await
            .map_err(VerificationError::Store)?
        {
            Some(record) => record,
            None => {
                debug!(email = %mask_email(&key), event = "otp_not_found", "No pending OTP");
                return Err(VerificationError::NotFound);
            }
        };

        if record.is_expired() {
            self.store
                .delete(&key)
                .await
                .map_err(VerificationError::Store)?;
            info!(email = %mask_email(&key), event = "otp_expired", "OTP expired, record removed");
            return Err(VerificationError::Expired);
        }

        if record.attempts >= self.config.max_attempts {
            self.store
                .delete(&key)
                .await
                .map_err(VerificationError::Store)?;
            warn!(
                email = %mask_email(&key),
                event = "otp_attempts_exhausted",
                "Attempt budget already exhausted, record removed"
            );
            return Err(VerificationError::TooManyAttempts);
        }

        if constant_time_eq(record.secret.as_bytes(), code.as_bytes()) {
            if !keep_code {
                self.store
                    .delete(&key)
                    .await
                    .map_err(VerificationError::Store)?;
            }
            info!(
                email = %mask_email(&key),
                kept = keep_code,
                event = "otp_verified",
                "OTP verified successfully"
            );
            return Ok(());
        }

        let attempts = record.attempts + 1;
        if attempts >= self.config.max_attempts {
            self.store
                .delete(&key)
                .await
                .map_err(VerificationError::Store)?;
            warn!(
                email = %mask_email(&key),
                attempts,
                event = "otp_locked_out",
                "Final attempt failed, record removed"
            );
            return Err(VerificationError::TooManyAttempts);
        }

        let remaining = self.config.max_attempts - attempts;
        self.store
            .set(&key, VerificationRecord { attempts, ..record })
            .await
            .map_err(VerificationError::Store)?;
        warn!(
            email = %mask_email(&key),
            attempts,
            remaining,
            event = "otp_mismatch",
            "Wrong OTP submitted"
        );
        Err(VerificationError::CodeMismatch {
            remaining_attempts: remaining,
        })
    }
}

/// First word of the display-name hint, or a neutral fallback.
pub(crate) fn recipient_name(hint: Option<&str>) -> String {
    hint.map(str::trim)
        .filter(|name| !name.is_empty())
        .and_then(|name| name.split_whitespace().next())
        .unwrap_or("User")
        .to_string()
}
