//! The dispatch engine.
//!
//! Persistence-first: the notification row is written before any channel is
//! invoked, so losing every provider still leaves the record visible
//! in-app. Channel deliveries then run as a structured fan-out/join: all
//! eligible channels at once, each under its own timeout, partial failure
//! tolerated.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use hudur_core::types::UserId;
use hudur_core::{Category, Channel, CoreError, Priority};
use tokio_util::sync::CancellationToken;
use validator::Validate;

use hudur_db::models::notification::{NewNotification, Notification};
use hudur_db::models::preferences::NotificationPreferences;
use hudur_db::repositories::{NotificationRepo, PreferenceRepo};
use hudur_db::DbPool;

use crate::channel::{DeliveryAttempt, DeliveryChannel};
use crate::channels::{
    EmailChannel, EmailConfig, PushChannel, PushConfig, RealtimeChannel, SmsChannel, SmsConfig,
};
use crate::eligibility::eligible_channels;
use crate::error::DispatchError;
use crate::hub::SessionHub;
use crate::request::SendNotification;

/// Per-channel delivery timeout. One slow provider must not stall the
/// others past this.
pub const CHANNEL_TIMEOUT: Duration = Duration::from_secs(10);

/// Orchestrates notification sends across the mounted delivery channels.
///
/// Shared via `Arc` between the HTTP layer and any in-process callers.
pub struct Dispatcher {
    pool: DbPool,
    hub: Arc<SessionHub>,
    channels: Vec<Arc<dyn DeliveryChannel>>,
}

impl Dispatcher {
    /// Build a dispatcher with whichever channels are configured in the
    /// environment. Realtime is always mounted (it has no external
    /// provider); email, SMS, and push are mounted only when their
    /// provider configuration is present.
    pub fn from_env(pool: DbPool, hub: Arc<SessionHub>) -> Self {
        let mut channels: Vec<Arc<dyn DeliveryChannel>> = Vec::new();

        match EmailConfig::from_env() {
            Some(config) => {
                channels.push(Arc::new(EmailChannel::new(pool.clone(), config)));
                tracing::info!("Email channel mounted");
            }
            None => tracing::info!("SMTP_HOST not set, email channel disabled"),
        }
        match SmsConfig::from_env() {
            Some(config) => {
                channels.push(Arc::new(SmsChannel::new(pool.clone(), config)));
                tracing::info!("SMS channel mounted");
            }
            None => tracing::info!("SMS_API_URL not set, SMS channel disabled"),
        }
        match PushConfig::from_env() {
            Some(config) => {
                channels.push(Arc::new(PushChannel::new(pool.clone(), config)));
                tracing::info!("Push channel mounted");
            }
            None => tracing::info!("PUSH_GATEWAY_URL not set, push channel disabled"),
        }
        channels.push(Arc::new(RealtimeChannel::new(Arc::clone(&hub))));

        Self::with_channels(pool, hub, channels)
    }

    /// Build a dispatcher with an explicit channel set.
    pub fn with_channels(
        pool: DbPool,
        hub: Arc<SessionHub>,
        channels: Vec<Arc<dyn DeliveryChannel>>,
    ) -> Self {
        Self {
            pool,
            hub,
            channels,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub(crate) fn hub(&self) -> &Arc<SessionHub> {
        &self.hub
    }

    /// Send one notification: persist, then fan out to eligible channels.
    ///
    /// The returned notification reflects the persisted row regardless of
    /// channel outcomes; the only hard error is failing to persist.
    pub async fn send(&self, request: SendNotification) -> Result<Notification, DispatchError> {
        self.send_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// [`send`](Dispatcher::send) with a caller-supplied cancellation scope.
    ///
    /// Cancellation aborts outstanding channel calls but never the
    /// notification persistence, which is issued before delivery starts.
    pub async fn send_with_cancel(
        &self,
        request: SendNotification,
        cancel: &CancellationToken,
    ) -> Result<Notification, DispatchError> {
        request
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let row = NewNotification {
            tenant_id: request.tenant_id,
            user_id: request.user_id,
            category: request.category,
            priority: request.priority,
            title: request.title,
            message: request.message,
            data: request.data,
            action_url: request.action_url,
            image_url: request.image_url,
            expires_at: request.expires_at,
        };
        let notification = NotificationRepo::insert(&self.pool, &row).await?;

        self.deliver_to_user(&notification, cancel, false).await;

        Ok(notification)
    }

    /// Evaluate preferences and fan out one persisted notification.
    ///
    /// `skip_realtime` is used by bulk dispatch when the user is already
    /// covered by a tenant/role group broadcast.
    pub(crate) async fn deliver_to_user(
        &self,
        notification: &Notification,
        cancel: &CancellationToken,
        skip_realtime: bool,
    ) -> Vec<DeliveryAttempt> {
        // Rows are only ever written from the typed enums, so these parses
        // cannot fail for rows this service produced.
        let (category, priority): (Category, Priority) = match (
            notification.category.parse(),
            notification.priority.parse(),
        ) {
            (Ok(c), Ok(p)) => (c, p),
            _ => {
                tracing::error!(
                    notification_id = %notification.id,
                    category = %notification.category,
                    priority = %notification.priority,
                    "Unparseable category/priority on stored notification, skipping delivery"
                );
                return Vec::new();
            }
        };

        let prefs = self.preferences_for(notification.user_id).await;

        let mut eligible =
            eligible_channels(&prefs, category, priority, chrono::Utc::now().time());
        if skip_realtime {
            eligible.retain(|&ch| ch != Channel::Realtime);
        }

        let attempts = fan_out(
            &self.channels,
            &eligible,
            notification,
            cancel,
            CHANNEL_TIMEOUT,
        )
        .await;

        for attempt in &attempts {
            if attempt.ok {
                tracing::debug!(
                    channel = %attempt.channel,
                    notification_id = %notification.id,
                    user_id = %notification.user_id,
                    "Channel delivery succeeded"
                );
            } else {
                tracing::warn!(
                    channel = %attempt.channel,
                    notification_id = %notification.id,
                    user_id = %notification.user_id,
                    error = attempt.error.as_deref().unwrap_or("unknown"),
                    "Channel delivery failed"
                );
            }
        }

        attempts
    }

    /// The user's stored preferences, or the lazily materialized default.
    ///
    /// A preference read failure is treated like a missing row: the default
    /// keeps delivery flowing rather than failing the whole send.
    async fn preferences_for(&self, user_id: UserId) -> NotificationPreferences {
        match PreferenceRepo::get(&self.pool, user_id).await {
            Ok(Some(prefs)) => prefs,
            Ok(None) => NotificationPreferences::default_for(user_id),
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Preference lookup failed, falling back to defaults"
                );
                NotificationPreferences::default_for(user_id)
            }
        }
    }
}

/// Invoke every mounted channel in `eligible` concurrently and join the
/// results.
///
/// Each call runs under `per_call_timeout`; cancellation aborts calls that
/// have not settled. One [`DeliveryAttempt`] is produced per invoked
/// channel, in mount order.
pub async fn fan_out(
    channels: &[Arc<dyn DeliveryChannel>],
    eligible: &[Channel],
    notification: &Notification,
    cancel: &CancellationToken,
    per_call_timeout: Duration,
) -> Vec<DeliveryAttempt> {
    let calls = channels
        .iter()
        .filter(|channel| eligible.contains(&channel.id()))
        .map(|channel| {
            let channel = Arc::clone(channel);
            async move {
                let id = channel.id();
                tokio::select! {
                    () = cancel.cancelled() => {
                        DeliveryAttempt::failure(id, "delivery cancelled")
                    }
                    result = tokio::time::timeout(per_call_timeout, channel.deliver(notification)) => {
                        match result {
                            Ok(Ok(())) => DeliveryAttempt::success(id),
                            Ok(Err(e)) => DeliveryAttempt::failure(id, e.to_string()),
                            Err(_) => DeliveryAttempt::failure(
                                id,
                                format!("timed out after {}ms", per_call_timeout.as_millis()),
                            ),
                        }
                    }
                }
            }
        });

    join_all(calls).await
}
