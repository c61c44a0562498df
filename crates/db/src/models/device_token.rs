//! Device token model for mobile push delivery.

use hudur_core::types::{Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `device_tokens` table.
///
/// Tokens are deactivated on unregister, never deleted, so a device that
/// re-registers the same token simply flips `is_active` back on.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceToken {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub token: String,
    pub platform: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
