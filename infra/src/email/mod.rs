//! Email dispatch implementations
//!
//! `SmtpMailer` is the production transport; `MockMailer` records dispatches
//! for tests that must observe the generated secret without a mail server.

pub mod mock;
pub mod smtp;

pub use mock::MockMailer;
pub use smtp::{SmtpConfig, SmtpMailer};
