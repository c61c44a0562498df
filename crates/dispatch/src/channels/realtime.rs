//! Realtime delivery through the in-process session hub.
//!
//! Fire-and-forget: the event is pushed to every connected session of the
//! owning user with no acknowledgment, no retry, and no delivery-state
//! persistence. A user with no connected session is a success; realtime is
//! inherently best-effort and the notification is already persisted for the
//! in-app list.

use std::sync::Arc;

use async_trait::async_trait;
use hudur_core::Channel;
use hudur_db::models::notification::Notification;

use crate::channel::{ChannelError, DeliveryChannel};
use crate::hub::{RealtimeEvent, SessionHub};

/// Pushes notifications to connected realtime sessions.
pub struct RealtimeChannel {
    hub: Arc<SessionHub>,
}

impl RealtimeChannel {
    pub fn new(hub: Arc<SessionHub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl DeliveryChannel for RealtimeChannel {
    fn id(&self) -> Channel {
        Channel::Realtime
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), ChannelError> {
        let event = RealtimeEvent::notification(notification);
        let sessions = self.hub.send_to_user(notification.user_id, &event).await;

        tracing::debug!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            sessions,
            "Realtime notification pushed"
        );
        Ok(())
    }
}
