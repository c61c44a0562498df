//! Handlers for the per-user `/users/{user_id}/notifications` resource.
//!
//! There is no ambient user context: the owning user is always an explicit
//! path parameter.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hudur_core::types::{NotificationId, UserId};
use hudur_core::CoreError;
use hudur_db::repositories::NotificationRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /users/{user_id}/notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Page size. Defaults to 50, capped at 100.
    pub page_size: Option<i64>,
}

/// Maximum page size for notification listing.
const MAX_PAGE_SIZE: i64 = 100;

/// Default page size for notification listing.
const DEFAULT_PAGE_SIZE: i64 = 50;

// ---------------------------------------------------------------------------
// Listing / counters
// ---------------------------------------------------------------------------

/// GET /api/v1/users/{user_id}/notifications
///
/// List a user's visible notifications, newest first. Soft-deleted and
/// expired notifications are never returned.
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * page_size;
    let unread_only = params.unread_only.unwrap_or(false);

    let notifications =
        NotificationRepo::list_for_user(&state.pool, user_id, unread_only, page_size, offset)
            .await?;

    Ok(Json(serde_json::json!({
        "data": notifications,
        "page": page,
        "page_size": page_size,
    })))
}

/// GET /api/v1/users/{user_id}/notifications/unread-count
///
/// Number of unread, visible notifications for the user.
pub async fn unread_count(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, user_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "count": count }
    })))
}

// ---------------------------------------------------------------------------
// Read-state mutations
// ---------------------------------------------------------------------------

/// POST /api/v1/users/{user_id}/notifications/{id}/read
///
/// Mark a single notification as read. Idempotent: re-marking keeps the
/// original read timestamp. Returns 204 on success, 404 when the
/// notification does not belong to the user.
pub async fn mark_read(
    State(state): State<AppState>,
    Path((user_id, notification_id)): Path<(UserId, NotificationId)>,
) -> AppResult<impl IntoResponse> {
    let found = NotificationRepo::mark_read(&state.pool, notification_id, user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{user_id}/notifications/read-all
///
/// Mark all of the user's unread notifications as read.
/// Returns the number of notifications that were marked.
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, user_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "marked_read": count }
    })))
}

/// DELETE /api/v1/users/{user_id}/notifications/{id}
///
/// Soft-delete a notification. Returns 204 on success, 404 when the
/// notification does not belong to the user or is already deleted.
pub async fn delete_notification(
    State(state): State<AppState>,
    Path((user_id, notification_id)): Path<(UserId, NotificationId)>,
) -> AppResult<impl IntoResponse> {
    let found = NotificationRepo::soft_delete(&state.pool, notification_id, user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
