//! In-process realtime session hub.
//!
//! [`SessionHub`] tracks every connected realtime session (one WebSocket
//! connection each) together with its user, tenant, and role subscriptions,
//! and fans messages out to them. Thread-safe via interior `RwLock`;
//! designed to be wrapped in `Arc` and shared between the dispatch engine
//! and the WebSocket layer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use hudur_core::types::{TenantId, Timestamp, UserId};
use serde::Serialize;
use tokio::sync::{mpsc, RwLock};

use hudur_db::models::notification::Notification;

/// Interval between heartbeat pings.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// A JSON-serializable event pushed to realtime sessions.
#[derive(Debug, Clone, Serialize)]
pub struct RealtimeEvent {
    /// Event kind, e.g. `"notification"`.
    pub kind: &'static str,
    /// Event-specific payload.
    pub payload: serde_json::Value,
    /// When the event was emitted (UTC).
    pub timestamp: Timestamp,
}

impl RealtimeEvent {
    /// Wrap a persisted notification for realtime push.
    pub fn notification(notification: &Notification) -> Self {
        Self {
            kind: "notification",
            payload: serde_json::to_value(notification).unwrap_or_default(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Message delivered through a session's outbound channel.
///
/// The WebSocket layer maps these onto wire frames (`Event` → Text,
/// `Ping` → Ping).
#[derive(Debug, Clone)]
pub enum SessionMessage {
    Event(RealtimeEvent),
    Ping,
}

/// Channel sender half for pushing messages to one session.
pub type SessionSender = mpsc::UnboundedSender<SessionMessage>;

/// Metadata for a single connected session.
pub struct Session {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    /// Role group subscriptions for this session.
    pub roles: Vec<String>,
    /// Channel sender for outbound messages to this session.
    pub sender: SessionSender,
    /// When this session was established.
    pub connected_at: Timestamp,
}

/// Manages all active realtime sessions.
pub struct SessionHub {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionHub {
    /// Create a new, empty hub.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new session.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        session_id: String,
        user_id: UserId,
        tenant_id: TenantId,
        roles: Vec<String>,
    ) -> mpsc::UnboundedReceiver<SessionMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Session {
            user_id,
            tenant_id,
            roles,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.sessions.write().await.insert(session_id, session);
        rx
    }

    /// Remove a session by its ID.
    pub async fn remove(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// Send an event to all sessions belonging to a specific user.
    ///
    /// Returns the number of sessions the event was sent to. Sessions whose
    /// send channels are closed are silently skipped (they will be cleaned
    /// up when their receive loop exits).
    pub async fn send_to_user(&self, user_id: UserId, event: &RealtimeEvent) -> usize {
        self.send_where(|s| s.user_id == user_id, event).await
    }

    /// Send an event to all sessions subscribed to a tenant group.
    pub async fn send_to_tenant(&self, tenant_id: TenantId, event: &RealtimeEvent) -> usize {
        self.send_where(|s| s.tenant_id == tenant_id, event).await
    }

    /// Send an event to all sessions subscribed to a role group.
    pub async fn send_to_role(&self, role: &str, event: &RealtimeEvent) -> usize {
        self.send_where(|s| s.roles.iter().any(|r| r == role), event)
            .await
    }

    async fn send_where<F>(&self, matches: F, event: &RealtimeEvent) -> usize
    where
        F: Fn(&Session) -> bool,
    {
        let sessions = self.sessions.read().await;
        let mut count = 0;
        for session in sessions.values() {
            if matches(session) {
                let _ = session.sender.send(SessionMessage::Event(event.clone()));
                count += 1;
            }
        }
        count
    }

    /// Send a Ping to every connected session.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let sessions = self.sessions.read().await;
        for session in sessions.values() {
            let _ = session.sender.send(SessionMessage::Ping);
        }
    }

    /// Return the current number of active sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every session's sender and clear the map.
    ///
    /// Used during graceful shutdown: each session's receive loop observes
    /// the closed channel and closes its WebSocket.
    pub async fn shutdown_all(&self) {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        sessions.clear();
        tracing::info!(count, "Closed all realtime sessions");
    }
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a background task that sends periodic Pings to all connected
/// sessions.
///
/// The returned `JoinHandle` can be used to abort the task during shutdown.
pub fn start_heartbeat(hub: Arc<SessionHub>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);

        loop {
            interval.tick().await;
            let count = hub.session_count().await;
            tracing::debug!(count, "Realtime heartbeat ping");
            hub.ping_all().await;
        }
    })
}
