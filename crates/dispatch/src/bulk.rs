//! Bulk dispatch.
//!
//! Targets are the deduplicated union of an explicit user list, a tenant's
//! active users, and a role's holders. All rows are batch-inserted up front
//! (visible in-app even if every provider is down), then delivered in
//! batches to bound provider concurrency.

use std::collections::HashSet;

use futures::future::join_all;
use hudur_core::types::UserId;
use hudur_core::CoreError;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use validator::Validate;

use hudur_db::models::notification::NewNotification;
use hudur_db::repositories::{NotificationRepo, UserRepo};

use crate::engine::Dispatcher;
use crate::error::DispatchError;
use crate::hub::RealtimeEvent;
use crate::request::SendBulkNotification;

/// Users per delivery batch. Rows are all inserted first; this only bounds
/// how many users' channel fan-outs run at once.
pub const BULK_BATCH_SIZE: usize = 100;

/// Whether a user should get a per-user realtime event during bulk
/// delivery. Only explicitly listed users qualify, and not when the tenant
/// or role broadcast already reached their sessions.
fn per_user_realtime(
    explicit: &HashSet<UserId>,
    broadcast_covered: &HashSet<UserId>,
    user: UserId,
) -> bool {
    explicit.contains(&user) && !broadcast_covered.contains(&user)
}

/// Union the three target sources, dropping duplicates while keeping
/// first-seen order.
pub fn merge_targets(
    explicit: Vec<UserId>,
    tenant: Vec<UserId>,
    role: Vec<UserId>,
) -> Vec<UserId> {
    let mut seen = HashSet::new();
    explicit
        .into_iter()
        .chain(tenant)
        .chain(role)
        .filter(|id| seen.insert(*id))
        .collect()
}

impl Dispatcher {
    /// Dispatch one notification to every resolved target.
    ///
    /// Returns `Ok(true)` when persistence succeeded for all targets;
    /// individual channel failures are logged and do not affect the result.
    /// An empty resolved target set is a no-op success.
    pub async fn send_bulk(&self, request: SendBulkNotification) -> Result<bool, DispatchError> {
        request
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let tenant_users = match request.tenant_id {
            Some(tenant_id) => UserRepo::ids_for_tenant(self.pool(), tenant_id).await?,
            None => Vec::new(),
        };
        let role_users = match request.role.as_deref() {
            Some(role) => UserRepo::ids_for_role(self.pool(), role).await?,
            None => Vec::new(),
        };
        let explicit: HashSet<UserId> = request.user_ids.iter().copied().collect();
        let broadcast_covered: HashSet<UserId> = tenant_users
            .iter()
            .chain(role_users.iter())
            .copied()
            .collect();
        let targets = merge_targets(request.user_ids.clone(), tenant_users, role_users);

        if targets.is_empty() {
            tracing::info!("Bulk dispatch resolved no targets, nothing to do");
            return Ok(true);
        }

        // Group-targeted rows carry the requested tenant when there is one;
        // a pure user-list bulk has no tenant of its own.
        let row_tenant = request.tenant_id.unwrap_or(Uuid::nil());
        let rows: Vec<NewNotification> = targets
            .iter()
            .map(|&user_id| NewNotification {
                tenant_id: row_tenant,
                user_id,
                category: request.category,
                priority: request.priority,
                title: request.title.clone(),
                message: request.message.clone(),
                data: request.data.clone(),
                action_url: request.action_url.clone(),
                image_url: request.image_url.clone(),
                expires_at: request.expires_at,
            })
            .collect();
        let notifications = NotificationRepo::insert_many(self.pool(), &rows).await?;

        tracing::info!(
            targets = notifications.len(),
            category = %request.category,
            "Bulk dispatch persisted, starting delivery"
        );

        // Tenant/role expansions get a single group broadcast; the per-user
        // fan-out below then skips realtime for everyone the broadcast
        // covers, so every session hears the event exactly once.
        let event = RealtimeEvent {
            kind: "notification",
            payload: serde_json::json!({
                "category": request.category,
                "priority": request.priority,
                "title": request.title,
                "message": request.message,
                "data": request.data,
                "action_url": request.action_url,
                "image_url": request.image_url,
            }),
            timestamp: chrono::Utc::now(),
        };
        if let Some(tenant_id) = request.tenant_id {
            let sessions = self.hub().send_to_tenant(tenant_id, &event).await;
            tracing::debug!(%tenant_id, sessions, "Tenant realtime broadcast");
        }
        if let Some(role) = request.role.as_deref() {
            let sessions = self.hub().send_to_role(role, &event).await;
            tracing::debug!(role, sessions, "Role realtime broadcast");
        }

        let cancel = CancellationToken::new();
        for batch in notifications.chunks(BULK_BATCH_SIZE) {
            join_all(batch.iter().map(|notification| {
                let skip_realtime =
                    !per_user_realtime(&explicit, &broadcast_covered, notification.user_id);
                self.deliver_to_user(notification, &cancel, skip_realtime)
            }))
            .await;
        }

        Ok(true)
    }
}
