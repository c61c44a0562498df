//! SMS delivery via a provider HTTP API.
//!
//! [`SmsChannel`] posts a Twilio-style form-encoded request to the
//! configured provider endpoint. The recipient phone number comes from the
//! user directory. A non-2xx provider response is a delivery failure but
//! never throws past the channel boundary.

use std::time::Duration;

use async_trait::async_trait;
use hudur_core::Channel;
use hudur_db::models::notification::Notification;
use hudur_db::repositories::UserRepo;
use hudur_db::DbPool;

use crate::channel::{ChannelError, DeliveryChannel};

/// HTTP request timeout for a single provider call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the SMS provider.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Provider message endpoint URL.
    pub api_url: String,
    /// Provider account identifier (basic-auth username).
    pub account_sid: String,
    /// Provider auth token (basic-auth password).
    pub auth_token: String,
    /// Sender phone number.
    pub from_number: String,
}

impl SmsConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMS_API_URL` is not set, signalling that SMS
    /// delivery is not configured and the channel should be skipped.
    ///
    /// | Variable          | Required |
    /// |-------------------|----------|
    /// | `SMS_API_URL`     | yes      |
    /// | `SMS_ACCOUNT_SID` | yes      |
    /// | `SMS_AUTH_TOKEN`  | yes      |
    /// | `SMS_FROM_NUMBER` | yes      |
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_url: std::env::var("SMS_API_URL").ok()?,
            account_sid: std::env::var("SMS_ACCOUNT_SID").ok()?,
            auth_token: std::env::var("SMS_AUTH_TOKEN").ok()?,
            from_number: std::env::var("SMS_FROM_NUMBER").ok()?,
        })
    }
}

/// Sends notification texts through the provider HTTP API.
pub struct SmsChannel {
    pool: DbPool,
    config: SmsConfig,
    client: reqwest::Client,
}

impl SmsChannel {
    /// Create a new SMS channel with a pre-configured HTTP client.
    pub fn new(pool: DbPool, config: SmsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            pool,
            config,
            client,
        }
    }
}

#[async_trait]
impl DeliveryChannel for SmsChannel {
    fn id(&self) -> Channel {
        Channel::Sms
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), ChannelError> {
        let contact = UserRepo::contact(&self.pool, notification.user_id).await?;
        let to_number = contact
            .and_then(|c| c.phone)
            .ok_or(ChannelError::MissingContact("phone number"))?;

        let body = format!("{}: {}", notification.title, notification.message);
        let form = [
            ("From", self.config.from_number.as_str()),
            ("To", to_number.as_str()),
            ("Body", body.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.api_url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChannelError::HttpStatus(response.status().as_u16()));
        }

        tracing::info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            "Notification SMS sent"
        );
        Ok(())
    }
}
