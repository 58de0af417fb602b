//! Verification services for the email OTP and password-reset flows.
//!
//! Two services share one store: `OtpService` issues and checks short-lived
//! 6-digit codes for email changes (rate-limited resends, 5-attempt
//! lockout), and `PasswordResetService` issues and checks long high-entropy
//! reset tokens (no attempt limit, verification does not consume).

mod config;
mod locks;
mod reset;
mod service;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use locks::KeyedLocks;
pub use reset::{PasswordResetService, RESET_KEY_PREFIX};
pub use service::OtpService;
pub use traits::{EmailDispatcher, VerificationStore};
pub use types::{SendOtpResult, SendResetResult};
