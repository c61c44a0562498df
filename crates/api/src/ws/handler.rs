use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use hudur_core::types::{TenantId, UserId};
use hudur_dispatch::SessionMessage;
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters for the realtime upgrade.
///
/// There is no ambient session context, so the subscriber identity is
/// passed explicitly: `?user_id=...&tenant_id=...&roles=manager,employee`.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    /// Comma-separated role group subscriptions.
    #[serde(default)]
    pub roles: String,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the session is registered with the hub and managed
/// by a sender task plus the inbound receive loop.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, params))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the session with the hub.
///   2. Spawns a sender task that maps hub messages onto wire frames.
///   3. Processes inbound messages on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState, params: WsParams) {
    let session_id = uuid::Uuid::new_v4().to_string();
    let roles: Vec<String> = params
        .roles
        .split(',')
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();

    tracing::info!(
        session_id = %session_id,
        user_id = %params.user_id,
        tenant_id = %params.tenant_id,
        "Realtime session connected"
    );

    let mut rx = state
        .hub
        .add(session_id.clone(), params.user_id, params.tenant_id, roles)
        .await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: map hub messages onto WebSocket frames.
    let sender_session_id = session_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let frame = match msg {
                SessionMessage::Event(event) => match serde_json::to_string(&event) {
                    Ok(json) => Message::Text(json.into()),
                    Err(e) => {
                        tracing::error!(
                            session_id = %sender_session_id,
                            error = %e,
                            "Failed to serialize realtime event"
                        );
                        continue;
                    }
                },
                SessionMessage::Ping => Message::Ping(Vec::new().into()),
            };
            if sink.send(frame).await.is_err() {
                tracing::debug!(session_id = %sender_session_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(session_id = %session_id, "Pong received");
            }
            Ok(_msg) => {
                // Clients only listen on this socket; inbound text is ignored.
            }
            Err(e) => {
                tracing::debug!(session_id = %session_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove session and abort sender task.
    state.hub.remove(&session_id).await;
    send_task.abort();
    tracing::info!(session_id = %session_id, "Realtime session disconnected");
}
