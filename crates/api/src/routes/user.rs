//! Route definitions for the per-user resources.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{device, notification, preferences};
use crate::state::AppState;

/// Routes mounted at `/users/{user_id}`.
///
/// ```text
/// GET    /notifications               -> list_notifications
/// GET    /notifications/unread-count  -> unread_count
/// POST   /notifications/read-all      -> mark_all_read
/// POST   /notifications/{id}/read     -> mark_read
/// DELETE /notifications/{id}          -> delete_notification
///
/// GET    /preferences                 -> get_preferences
/// PUT    /preferences                 -> update_preferences
///
/// POST   /devices                     -> register_device
/// DELETE /devices                     -> unregister_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Notification inbox
        .route("/notifications", get(notification::list_notifications))
        .route(
            "/notifications/unread-count",
            get(notification::unread_count),
        )
        .route("/notifications/read-all", post(notification::mark_all_read))
        .route("/notifications/{id}/read", post(notification::mark_read))
        .route(
            "/notifications/{id}",
            delete(notification::delete_notification),
        )
        // Preferences
        .route(
            "/preferences",
            get(preferences::get_preferences).put(preferences::update_preferences),
        )
        // Device tokens
        .route(
            "/devices",
            post(device::register_device).delete(device::unregister_device),
        )
}
