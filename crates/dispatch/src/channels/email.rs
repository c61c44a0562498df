//! Email delivery via SMTP.
//!
//! [`EmailChannel`] wraps the `lettre` async SMTP transport. The recipient
//! address comes from the user directory; a user with no address on file is
//! a (non-fatal) delivery failure. Configuration is loaded from environment
//! variables; if `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns
//! `None` and the channel is not mounted.

use async_trait::async_trait;
use hudur_core::Channel;
use hudur_db::models::notification::Notification;
use hudur_db::repositories::UserRepo;
use hudur_db::DbPool;

use crate::channel::{ChannelError, DeliveryChannel};

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@hudur.local";

/// Configuration for the SMTP email channel.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and the channel should be skipped.
    ///
    /// | Variable        | Required | Default                |
    /// |-----------------|----------|------------------------|
    /// | `SMTP_HOST`     | yes      | --                     |
    /// | `SMTP_PORT`     | no       | `587`                  |
    /// | `SMTP_FROM`     | no       | `noreply@hudur.local`  |
    /// | `SMTP_USER`     | no       | --                     |
    /// | `SMTP_PASSWORD` | no       | --                     |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Sends notification emails via SMTP.
pub struct EmailChannel {
    pool: DbPool,
    config: EmailConfig,
}

impl EmailChannel {
    /// Create a new email channel with the given configuration.
    pub fn new(pool: DbPool, config: EmailConfig) -> Self {
        Self { pool, config }
    }
}

#[async_trait]
impl DeliveryChannel for EmailChannel {
    fn id(&self) -> Channel {
        Channel::Email
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), ChannelError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let contact = UserRepo::contact(&self.pool, notification.user_id).await?;
        let to_email = contact
            .and_then(|c| c.email)
            .ok_or(ChannelError::MissingContact("email address"))?;

        let body = match &notification.action_url {
            Some(url) => format!("{}\n\n{}", notification.message, url),
            None => notification.message.clone(),
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(&notification.title)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| ChannelError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            "Notification email sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn channel_error_display_build() {
        let err = ChannelError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn channel_error_display_missing_contact() {
        let err = ChannelError::MissingContact("email address");
        assert_eq!(err.to_string(), "No email address on file for user");
    }
}
