//! Recording mock dispatcher.
//!
//! Stands in for the SMTP transport in integration tests and local
//! development (`EMAIL_PROVIDER=mock`): dispatched secrets are captured
//! in memory instead of leaving the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;

use verimail_core::services::verification::EmailDispatcher;
use verimail_shared::utils::email::mask_email;

/// Mock mailer that records every dispatch
#[derive(Clone, Default)]
pub struct MockMailer {
    sent_codes: Arc<Mutex<HashMap<String, String>>>,
    sent_tokens: Arc<Mutex<HashMap<String, String>>>,
    fail_sends: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose sends always fail, for dispatch-failure paths
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// Last OTP dispatched to `to`, if any
    pub fn sent_code(&self, to: &str) -> Option<String> {
        self.sent_codes.lock().unwrap().get(to).cloned()
    }

    /// Last reset token dispatched to `to`, if any
    pub fn sent_token(&self, to: &str) -> Option<String> {
        self.sent_tokens.lock().unwrap().get(to).cloned()
    }
}

#[async_trait]
impl EmailDispatcher for MockMailer {
    async fn send_otp_email(
        &self,
        to: &str,
        _recipient_name: &str,
        code: &str,
    ) -> Result<(), String> {
        if self.fail_sends {
            return Err("mock transport failure".to_string());
        }
        self.sent_codes
            .lock()
            .unwrap()
            .insert(to.to_string(), code.to_string());
        info!(to = %mask_email(to), "Mock mailer recorded OTP email");
        Ok(())
    }

    async fn send_reset_email(
        &self,
        to: &str,
        _recipient_name: &str,
        token: &str,
    ) -> Result<(), String> {
        if self.fail_sends {
            return Err("mock transport failure".to_string());
        }
        self.sent_tokens
            .lock()
            .unwrap()
            .insert(to.to_string(), token.to_string());
        info!(to = %mask_email(to), "Mock mailer recorded reset email");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_dispatches() {
        let mailer = MockMailer::new();

        mailer
            .send_otp_email("user@example.com", "User", "123456")
            .await
            .unwrap();
        mailer
            .send_reset_email("user@example.com", "User", "deadbeef")
            .await
            .unwrap();

        assert_eq!(mailer.sent_code("user@example.com").unwrap(), "123456");
        assert_eq!(mailer.sent_token("user@example.com").unwrap(), "deadbeef");
    }

    #[tokio::test]
    async fn test_failing_mailer_rejects_sends() {
        let mailer = MockMailer::failing();
        let result = mailer
            .send_otp_email("user@example.com", "User", "123456")
            .await;
        assert!(result.is_err());
        assert!(mailer.sent_code("user@example.com").is_none());
    }
}
