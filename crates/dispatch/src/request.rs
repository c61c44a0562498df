//! Dispatch request DTOs.
//!
//! Ids are explicit parameters: there is no ambient tenant or user context.
//! Category and priority are typed enums, so an unknown value is rejected at
//! the serde boundary before anything is persisted.

use hudur_core::types::{TenantId, Timestamp, UserId};
use hudur_core::{Category, Priority};
use serde::Deserialize;
use validator::Validate;

/// A single logical "send notification" request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendNotification {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

/// A bulk request targeting an explicit user list, a whole tenant, a role,
/// or any combination. The resolved union is deduplicated before persistence.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendBulkNotification {
    #[serde(default)]
    pub user_ids: Vec<UserId>,
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
    #[serde(default)]
    pub role: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "message must not be empty"))]
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}
