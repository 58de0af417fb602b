//! Verification record entity shared by the OTP and reset-token flows.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Length of a one-time passcode
pub const OTP_LENGTH: usize = 6;

/// Maximum number of OTP verification attempts allowed
pub const MAX_OTP_ATTEMPTS: u32 = 5;

/// Default expiration time for OTP records (10 minutes)
pub const OTP_EXPIRY_MINUTES: i64 = 10;

/// Default expiration time for reset-token records (30 minutes)
pub const RESET_TOKEN_EXPIRY_MINUTES: i64 = 30;

/// Number of random bytes in a reset token (hex-encoded to 64 characters)
pub const RESET_TOKEN_BYTES: usize = 32;

/// Minimum remaining validity (seconds) below which a fresh OTP may be issued
pub const RESEND_GUARD_SECONDS: i64 = 60;

/// A pending verification secret stored under one identifier key.
///
/// One struct serves both flows: the OTP flow stores a 6-digit numeric code
/// and counts failed attempts; the reset-token flow stores a 64-hex-char
/// token and leaves `attempts` at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// The secret: a 6-digit code or a hex-encoded token
    pub secret: String,

    /// Timestamp when the record expires
    pub expires_at: DateTime<Utc>,

    /// Number of failed verification attempts (OTP flow only)
    pub attempts: u32,
}

impl VerificationRecord {
    /// Create a new OTP record with a freshly generated 6-digit code.
    pub fn new_otp(expiry_minutes: i64) -> Self {
        Self {
            secret: Self::generate_otp_code(),
            expires_at: Utc::now() + Duration::minutes(expiry_minutes),
            attempts: 0,
        }
    }

    /// Create a new reset-token record with a freshly generated token.
    pub fn new_reset_token(expiry_minutes: i64) -> Self {
        Self {
            secret: Self::generate_reset_token(),
            expires_at: Utc::now() + Duration::minutes(expiry_minutes),
            attempts: 0,
        }
    }

    /// Generate a uniformly random 6-digit decimal code.
    ///
    /// The range is `100000..=999999`, so the code always has exactly six
    /// digits and never collapses a leading zero. Drawn from the OS CSPRNG.
    pub fn generate_otp_code() -> String {
        let mut rng = OsRng;
        let code: u32 = rng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Generate a high-entropy reset token: 32 random bytes from the OS
    /// CSPRNG, hex-encoded. The token is bearer-equivalent to a password
    /// reset, so a general-purpose PRNG is not acceptable here.
    pub fn generate_reset_token() -> String {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Check whether the record has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Remaining OTP attempts before lockout (0 if exhausted).
    pub fn remaining_attempts(&self) -> u32 {
        MAX_OTP_ATTEMPTS.saturating_sub(self.attempts)
    }

    /// Time remaining until expiry, clamped to zero once passed.
    pub fn time_until_expiry(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
