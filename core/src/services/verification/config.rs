//! Configuration for the verification services

use crate::domain::entities::verification_record::{
    MAX_OTP_ATTEMPTS, OTP_EXPIRY_MINUTES, RESEND_GUARD_SECONDS, RESET_TOKEN_EXPIRY_MINUTES,
};

/// Configuration shared by the OTP and reset-token services
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Minutes before an OTP record expires
    pub otp_expiry_minutes: i64,

    /// Minutes before a reset-token record expires
    pub reset_token_expiry_minutes: i64,

    /// Maximum number of OTP verification attempts
    pub max_attempts: u32,

    /// A new OTP may only be issued once the previous one has no more than
    /// this many seconds of validity left
    pub resend_guard_seconds: i64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            otp_expiry_minutes: OTP_EXPIRY_MINUTES,
            reset_token_expiry_minutes: RESET_TOKEN_EXPIRY_MINUTES,
            max_attempts: MAX_OTP_ATTEMPTS,
            resend_guard_seconds: RESEND_GUARD_SECONDS,
        }
    }
}
