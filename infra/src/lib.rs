//! # Infrastructure Layer
//!
//! Concrete implementations behind the core seams:
//! - **Store**: the process-wide in-memory verification table
//! - **Email**: SMTP dispatch via lettre, plus a recording mock for tests

use thiserror::Error;

/// Verification store implementations
pub mod store;

/// Email dispatch implementations
pub mod email;

/// Errors produced by infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// Configuration error (missing or malformed environment variables)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email transport error
    #[error("Email error: {0}")]
    Email(String),
}
