//! Domain error taxonomy for the verification flows.
//!
//! Every failure a flow can produce is a variant here; the presentation
//! layer maps variants to HTTP statuses and user-facing messages. Display
//! strings are for logs only and never contain a generated secret.

use thiserror::Error;

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, VerificationError>;

/// Failures produced by the OTP and reset-token flows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The submitted email address is malformed (missing `@`)
    #[error("invalid email address")]
    InvalidEmail,

    /// A required request field was missing or empty
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// A still-valid OTP exists; the caller must wait before reissuing
    #[error("rate limited, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: i64 },

    /// No pending record for this identifier
    #[error("no pending verification found")]
    NotFound,

    /// The record existed but its expiry has passed; it has been deleted
    #[error("verification secret expired")]
    Expired,

    /// The OTP attempt budget is exhausted; the record has been deleted
    #[error("too many failed attempts")]
    TooManyAttempts,

    /// Wrong OTP; the attempt counter has been incremented
    #[error("invalid code, {remaining_attempts} attempt(s) remaining")]
    CodeMismatch { remaining_attempts: u32 },

    /// Wrong reset token; the record is left untouched
    #[error("invalid reset token")]
    InvalidToken,

    /// The secret was generated and stored but the email failed to send
    #[error("email dispatch failed: {0}")]
    DispatchFailed(String),

    /// The verification store itself failed
    #[error("verification store error: {0}")]
    Store(String),
}

impl VerificationError {
    /// Machine-checkable outcome code for the API envelope
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::NotFound => "NOT_FOUND",
            Self::Expired => "EXPIRED",
            Self::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            Self::CodeMismatch { .. } => "INVALID_CODE",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::DispatchFailed(_) => "DISPATCH_FAILED",
            Self::Store(_) => "INTERNAL_ERROR",
        }
    }
}
