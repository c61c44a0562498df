pub mod health;
pub mod notification;
pub mod user;

use axum::routing::any;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                          WebSocket upgrade
///
/// /notifications                               send (POST)
/// /notifications/bulk                          bulk send (POST)
///
/// /users/{user_id}/notifications               list (GET)
/// /users/{user_id}/notifications/unread-count  unread count (GET)
/// /users/{user_id}/notifications/read-all      mark all read (POST)
/// /users/{user_id}/notifications/{id}/read     mark read (POST)
/// /users/{user_id}/notifications/{id}          soft delete (DELETE)
///
/// /users/{user_id}/preferences                 get, replace (GET, PUT)
///
/// /users/{user_id}/devices                     register, unregister (POST, DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", any(ws::ws_handler))
        .nest("/notifications", notification::router())
        .nest("/users/{user_id}", user::router())
}
