//! Mobile push delivery via a push gateway HTTP API.
//!
//! A single user may have several active device tokens; [`PushChannel`]
//! posts to the gateway once per token, concurrently, and reports success
//! if at least one token delivery succeeds. A user with zero active tokens
//! is a success (there is simply nothing to deliver to).

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use hudur_core::Channel;
use hudur_db::models::device_token::DeviceToken;
use hudur_db::models::notification::Notification;
use hudur_db::repositories::DeviceTokenRepo;
use hudur_db::DbPool;

use crate::channel::{ChannelError, DeliveryChannel};

/// HTTP request timeout for a single gateway call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the push gateway.
#[derive(Debug, Clone)]
pub struct PushConfig {
    /// Gateway send endpoint URL.
    pub gateway_url: String,
    /// Gateway server key, sent as an authorization header.
    pub server_key: String,
}

impl PushConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `PUSH_GATEWAY_URL` is not set, signalling that push
    /// delivery is not configured and the channel should be skipped.
    ///
    /// | Variable           | Required |
    /// |--------------------|----------|
    /// | `PUSH_GATEWAY_URL` | yes      |
    /// | `PUSH_SERVER_KEY`  | yes      |
    pub fn from_env() -> Option<Self> {
        Some(Self {
            gateway_url: std::env::var("PUSH_GATEWAY_URL").ok()?,
            server_key: std::env::var("PUSH_SERVER_KEY").ok()?,
        })
    }
}

/// Sends mobile push notifications through the gateway HTTP API.
pub struct PushChannel {
    pool: DbPool,
    config: PushConfig,
    client: reqwest::Client,
}

impl PushChannel {
    /// Create a new push channel with a pre-configured HTTP client.
    pub fn new(pool: DbPool, config: PushConfig) -> Self {
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

    /// Post one gateway request for a single device token.
    async fn send_to_token(
        &self,
        token: &DeviceToken,
        notification: &Notification,
    ) -> Result<(), ChannelError> {
        let payload = serde_json::json!({
            "to": token.token,
            "platform": token.platform,
            "notification": {
                "title": notification.title,
                "body": notification.message,
                "click_action": notification.action_url,
                "image": notification.image_url,
            },
            "data": notification.data,
        });

        let response = self
            .client
            .post(&self.config.gateway_url)
            .header("Authorization", format!("key={}", self.config.server_key))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChannelError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }

    /// Fan out to a known set of device tokens, one gateway call per token.
    ///
    /// Succeeds when at least one token delivery succeeds, or when there are
    /// no tokens at all.
    pub async fn deliver_to_tokens(
        &self,
        tokens: &[DeviceToken],
        notification: &Notification,
    ) -> Result<(), ChannelError> {
        if tokens.is_empty() {
            tracing::debug!(
                user_id = %notification.user_id,
                "No active device tokens, nothing to push"
            );
            return Ok(());
        }

        let results = join_all(
            tokens
                .iter()
                .map(|token| self.send_to_token(token, notification)),
        )
        .await;

        let delivered = results.iter().filter(|r| r.is_ok()).count();
        for (token, result) in tokens.iter().zip(&results) {
            if let Err(e) = result {
                tracing::debug!(
                    user_id = %notification.user_id,
                    platform = %token.platform,
                    error = %e,
                    "Push delivery to device token failed"
                );
            }
        }

        // Partial success is success: at least one device got it.
        if delivered > 0 {
            tracing::info!(
                notification_id = %notification.id,
                user_id = %notification.user_id,
                delivered,
                total = tokens.len(),
                "Push notification sent"
            );
            Ok(())
        } else {
            Err(ChannelError::AllFailed("device token"))
        }
    }
}

#[async_trait]
impl DeliveryChannel for PushChannel {
    fn id(&self) -> Channel {
        Channel::Push
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), ChannelError> {
        let tokens = DeviceTokenRepo::list_active(&self.pool, notification.user_id).await?;
        self.deliver_to_tokens(&tokens, notification).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_gateway_url() {
        std::env::remove_var("PUSH_GATEWAY_URL");
        assert!(PushConfig::from_env().is_none());
    }

    #[test]
    fn channel_error_display_all_failed() {
        let err = ChannelError::AllFailed("device token");
        assert_eq!(err.to_string(), "All device token deliveries failed");
    }
}
