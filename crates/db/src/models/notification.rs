//! Notification entity model and insert DTO.

use hudur_core::types::{NotificationId, TenantId, Timestamp, UserId};
use hudur_core::{Category, Priority};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
///
/// Written exactly once per logical send; afterwards only the read flag
/// and the soft-delete flag are ever mutated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub category: String,
    pub priority: String,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub action_url: Option<String>,
    pub image_url: Option<String>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Insert DTO for a single notification row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNotification {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub category: Category,
    pub priority: Priority,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub action_url: Option<String>,
    pub image_url: Option<String>,
    pub expires_at: Option<Timestamp>,
}
