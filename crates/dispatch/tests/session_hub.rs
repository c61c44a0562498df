//! Unit tests for `SessionHub`.
//!
//! These tests exercise the realtime session hub directly, without
//! performing any WebSocket upgrades. They verify add/remove semantics,
//! user/tenant/role targeting, heartbeat pings, and shutdown behaviour.

use hudur_dispatch::hub::{RealtimeEvent, SessionHub, SessionMessage};
use uuid::Uuid;

fn event(kind: &'static str) -> RealtimeEvent {
    RealtimeEvent {
        kind,
        payload: serde_json::json!({"title": "t"}),
        timestamp: chrono::Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Test: new hub starts with zero sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_hub_has_zero_sessions() {
    let hub = SessionHub::new();

    assert_eq!(hub.session_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: add() increments the session count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_increments_session_count() {
    let hub = SessionHub::new();

    let _rx = hub
        .add("sess-1".to_string(), Uuid::new_v4(), Uuid::new_v4(), vec![])
        .await;

    assert_eq!(hub.session_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: remove() decrements the session count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_decrements_session_count() {
    let hub = SessionHub::new();

    let _rx = hub
        .add("sess-1".to_string(), Uuid::new_v4(), Uuid::new_v4(), vec![])
        .await;
    assert_eq!(hub.session_count().await, 1);

    hub.remove("sess-1").await;
    assert_eq!(hub.session_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: send_to_user() reaches only that user's sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_user_targets_only_that_user() {
    let hub = SessionHub::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let tenant = Uuid::new_v4();

    let mut rx_alice_1 = hub
        .add("sess-1".to_string(), alice, tenant, vec![])
        .await;
    let mut rx_alice_2 = hub
        .add("sess-2".to_string(), alice, tenant, vec![])
        .await;
    let mut rx_bob = hub.add("sess-3".to_string(), bob, tenant, vec![]).await;

    let sent = hub.send_to_user(alice, &event("notification")).await;
    assert_eq!(sent, 2);

    // Both of Alice's sessions receive the event.
    assert!(matches!(
        rx_alice_1.recv().await,
        Some(SessionMessage::Event(e)) if e.kind == "notification"
    ));
    assert!(matches!(
        rx_alice_2.recv().await,
        Some(SessionMessage::Event(_))
    ));

    // Bob's queue stays empty.
    assert!(rx_bob.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: send_to_tenant() reaches every session in the tenant
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_tenant_reaches_all_tenant_sessions() {
    let hub = SessionHub::new();
    let tenant_a = Uuid::new_v4();
    let tenant_b = Uuid::new_v4();

    let mut rx_a1 = hub
        .add("sess-1".to_string(), Uuid::new_v4(), tenant_a, vec![])
        .await;
    let mut rx_a2 = hub
        .add("sess-2".to_string(), Uuid::new_v4(), tenant_a, vec![])
        .await;
    let mut rx_b = hub
        .add("sess-3".to_string(), Uuid::new_v4(), tenant_b, vec![])
        .await;

    let sent = hub.send_to_tenant(tenant_a, &event("notification")).await;
    assert_eq!(sent, 2);

    assert!(matches!(rx_a1.recv().await, Some(SessionMessage::Event(_))));
    assert!(matches!(rx_a2.recv().await, Some(SessionMessage::Event(_))));
    assert!(rx_b.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: send_to_role() matches any of a session's roles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_role_matches_any_subscribed_role() {
    let hub = SessionHub::new();
    let tenant = Uuid::new_v4();

    let mut rx_manager = hub
        .add(
            "sess-1".to_string(),
            Uuid::new_v4(),
            tenant,
            vec!["manager".to_string(), "employee".to_string()],
        )
        .await;
    let mut rx_employee = hub
        .add(
            "sess-2".to_string(),
            Uuid::new_v4(),
            tenant,
            vec!["employee".to_string()],
        )
        .await;

    let sent = hub.send_to_role("manager", &event("notification")).await;
    assert_eq!(sent, 1);

    assert!(matches!(
        rx_manager.recv().await,
        Some(SessionMessage::Event(_))
    ));
    assert!(rx_employee.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: send to a user with no sessions delivers to nobody
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_absent_user_delivers_to_nobody() {
    let hub = SessionHub::new();

    let _rx = hub
        .add("sess-1".to_string(), Uuid::new_v4(), Uuid::new_v4(), vec![])
        .await;

    let sent = hub.send_to_user(Uuid::new_v4(), &event("notification")).await;
    assert_eq!(sent, 0);
}

// ---------------------------------------------------------------------------
// Test: sends skip closed channels without panicking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_skips_closed_channels() {
    let hub = SessionHub::new();
    let user = Uuid::new_v4();
    let tenant = Uuid::new_v4();

    let rx_dropped = hub.add("sess-1".to_string(), user, tenant, vec![]).await;
    let mut rx_live = hub.add("sess-2".to_string(), user, tenant, vec![]).await;

    // Drop one receiver to close its channel.
    drop(rx_dropped);

    hub.send_to_user(user, &event("notification")).await;

    assert!(matches!(
        rx_live.recv().await,
        Some(SessionMessage::Event(_))
    ));
}

// ---------------------------------------------------------------------------
// Test: ping_all() sends a Ping to every session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_all_reaches_every_session() {
    let hub = SessionHub::new();

    let mut rx1 = hub
        .add("sess-1".to_string(), Uuid::new_v4(), Uuid::new_v4(), vec![])
        .await;
    let mut rx2 = hub
        .add("sess-2".to_string(), Uuid::new_v4(), Uuid::new_v4(), vec![])
        .await;

    hub.ping_all().await;

    assert!(matches!(rx1.recv().await, Some(SessionMessage::Ping)));
    assert!(matches!(rx2.recv().await, Some(SessionMessage::Ping)));
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() closes every session's channel
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_closes_every_channel() {
    let hub = SessionHub::new();

    let mut rx1 = hub
        .add("sess-1".to_string(), Uuid::new_v4(), Uuid::new_v4(), vec![])
        .await;
    let mut rx2 = hub
        .add("sess-2".to_string(), Uuid::new_v4(), Uuid::new_v4(), vec![])
        .await;
    assert_eq!(hub.session_count().await, 2);

    hub.shutdown_all().await;

    assert_eq!(hub.session_count().await, 0);

    // Senders are dropped with the map entries, so the receivers observe
    // a closed channel.
    assert!(rx1.recv().await.is_none());
    assert!(rx2.recv().await.is_none());
}

// ---------------------------------------------------------------------------
// Test: adding with a duplicate session ID replaces the previous session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_session_id_replaces_previous_session() {
    let hub = SessionHub::new();
    let user = Uuid::new_v4();
    let tenant = Uuid::new_v4();

    let _rx_old = hub.add("sess-1".to_string(), user, tenant, vec![]).await;
    assert_eq!(hub.session_count().await, 1);

    let mut rx_new = hub.add("sess-1".to_string(), user, tenant, vec![]).await;
    assert_eq!(hub.session_count().await, 1);

    hub.send_to_user(user, &event("notification")).await;
    assert!(matches!(
        rx_new.recv().await,
        Some(SessionMessage::Event(_))
    ));
}
