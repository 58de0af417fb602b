//! Result types for the verification services

use chrono::{DateTime, Utc};

/// Result of issuing an OTP
#[derive(Debug, Clone)]
pub struct SendOtpResult {
    /// When the issued code expires
    pub expires_at: DateTime<Utc>,

    /// When a replacement code may be requested
    pub resend_available_at: DateTime<Utc>,
}

/// Result of issuing a reset token
#[derive(Debug, Clone)]
pub struct SendResetResult {
    /// When the issued token expires
    pub expires_at: DateTime<Utc>,
}
