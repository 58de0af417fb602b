//! SMTP email dispatcher built on lettre.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

use verimail_core::services::verification::EmailDispatcher;
use verimail_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// SMTP transport configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port (465 implies implicit TLS, otherwise STARTTLS)
    pub port: u16,
    /// Account username; also used as the sender address
    pub username: String,
    /// Account password
    pub password: String,
    /// Display name on the From header
    pub from_name: String,
    /// Base URL the reset link points at
    pub app_base_url: String,
}

impl SmtpConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let host = std::env::var("SMTP_HOST")
            .map_err(|_| InfrastructureError::Config("SMTP_HOST not set".to_string()))?;
        let username = std::env::var("SMTP_USER")
            .map_err(|_| InfrastructureError::Config("SMTP_USER not set".to_string()))?;
        let password = std::env::var("SMTP_PASSWORD")
            .map_err(|_| InfrastructureError::Config("SMTP_PASSWORD not set".to_string()))?;

        Ok(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(465),
            username,
            password,
            from_name: std::env::var("MAIL_FROM_NAME")
                .unwrap_or_else(|_| "Verimail".to_string()),
            app_base_url: std::env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
        })
    }
}

/// SMTP email dispatcher
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a new SMTP mailer from the given configuration
    pub fn new(config: SmtpConfig) -> Result<Self, InfrastructureError> {
        let builder = if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| InfrastructureError::Email(e.to_string()))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        info!(
            host = %config.host,
            port = config.port,
            "SMTP mailer initialized"
        );

        Ok(Self { transport, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SmtpConfig::from_env()?)
    }

    fn from_mailbox(&self) -> Result<Mailbox, String> {
        format!("{} <{}>", self.config.from_name, self.config.username)
            .parse()
            .map_err(|e| format!("invalid from address: {}", e))
    }

    async fn dispatch(&self, to: &str, subject: &str, text: String, html: String) -> Result<(), String> {
        let message = Message::builder()
            .from(self.from_mailbox()?)
            .to(to
                .parse()
                .map_err(|e| format!("invalid recipient address: {}", e))?)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(text, html))
            .map_err(|e| format!("failed to build message: {}", e))?;

        debug!(to = %mask_email(to), subject, "Sending email");
        self.transport
            .send(message)
            .await
            .map_err(|e| {
                warn!(to = %mask_email(to), error = %e, "SMTP send failed");
                e.to_string()
            })
            .map(|_| ())
    }
}

#[async_trait]
impl EmailDispatcher for SmtpMailer {
    async fn send_otp_email(
        &self,
        to: &str,
        recipient_name: &str,
        code: &str,
    ) -> Result<(), String> {
        let subject = "Action Required: Verify your Email Address";
        let text = format!(
            "Hello {recipient_name},\n\n\
             We received a request to update your email address. To confirm it's \
             really you, please enter the verification code below:\n\n\
             Your verification code: {code}\n\n\
             This code will expire in 10 minutes.\n\n\
             If you didn't request this change, you can safely ignore this email.\n\n\
             Thank you,\n\
             Team {from_name}",
            from_name = self.config.from_name,
        );
        let html = format!(
            "<p>Hello {recipient_name},</p>\
             <p>We received a request to update your email address. To confirm it's \
             really you, please enter the verification code below:</p>\
             <p style=\"font-size:32px;font-weight:bold;letter-spacing:8px;\">{code}</p>\
             <p>This code will expire in 10 minutes.</p>\
             <p>If you didn't request this change, you can safely ignore this email.</p>\
             <p>Thank you,<br>Team {from_name}</p>",
            from_name = self.config.from_name,
        );

        self.dispatch(to, subject, text, html).await?;
        info!(to = %mask_email(to), "Verification code email sent");
        Ok(())
    }

    async fn send_reset_email(
        &self,
        to: &str,
        recipient_name: &str,
        token: &str,
    ) -> Result<(), String> {
        let url = reset_url(&self.config.app_base_url, token, to);
        let subject = "Reset Your Password";
        let text = format!(
            "Hello {recipient_name},\n\n\
             We received a request to reset your password. Open the link below to \
             choose a new one:\n\n\
             {url}\n\n\
             This link will expire in 30 minutes.\n\n\
             If you didn't request a password reset, you can safely ignore this \
             email.\n\n\
             Thank you,\n\
             Team {from_name}",
            from_name = self.config.from_name,
        );
        let html = format!(
            "<p>Hello {recipient_name},</p>\
             <p>We received a request to reset your password. Click the link below \
             to choose a new one:</p>\
             <p><a href=\"{url}\">Reset your password</a></p>\
             <p>This link will expire in 30 minutes.</p>\
             <p>If you didn't request a password reset, you can safely ignore this \
             email.</p>\
             <p>Thank you,<br>Team {from_name}</p>",
            from_name = self.config.from_name,
        );

        self.dispatch(to, subject, text, html).await?;
        info!(to = %mask_email(to), "Password reset email sent");
        Ok(())
    }
}

/// Build the reset link embedding the token and the (url-encoded) address.
fn reset_url(base_url: &str, token: &str, email: &str) -> String {
    format!(
        "{}/auth/reset-password?token={}&email={}",
        base_url.trim_end_matches('/'),
        token,
        urlencoding::encode(email)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_url_encodes_email() {
        let url = reset_url("http://localhost:3001", "abc123", "a+b@c.com");
        assert_eq!(
            url,
            "http://localhost:3001/auth/reset-password?token=abc123&email=a%2Bb%40c.com"
        );
    }

    #[test]
    fn test_reset_url_trims_trailing_slash() {
        let url = reset_url("https://app.example.com/", "tok", "a@b.com");
        assert!(url.starts_with("https://app.example.com/auth/reset-password?"));
    }

    #[test]
    fn test_config_defaults() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 465,
            username: "mailer@example.com".to_string(),
            password: "secret".to_string(),
            from_name: "Verimail".to_string(),
            app_base_url: "http://localhost:3001".to_string(),
        };
        // Port 465 selects the implicit-TLS relay path
        assert!(SmtpMailer::new(config).is_ok());
    }
}
