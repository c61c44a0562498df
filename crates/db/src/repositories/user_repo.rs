//! Read-only access to the user/role directory.

use hudur_core::types::{TenantId, UserId};
use sqlx::PgPool;

use crate::models::user::UserContact;

/// Directory lookups used for bulk target expansion and channel contact
/// resolution. This service never writes to the directory tables.
pub struct UserRepo;

impl UserRepo {
    /// All active user ids belonging to a tenant.
    pub async fn ids_for_tenant(
        pool: &PgPool,
        tenant_id: TenantId,
    ) -> Result<Vec<UserId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM users WHERE tenant_id = $1 AND is_active = true")
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// All active user ids holding the named role.
    pub async fn ids_for_role(pool: &PgPool, role: &str) -> Result<Vec<UserId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT u.id FROM users u \
             JOIN user_roles ur ON ur.user_id = u.id \
             JOIN roles r ON r.id = ur.role_id \
             WHERE r.name = $1 AND u.is_active = true",
        )
        .bind(role)
        .fetch_all(pool)
        .await
    }

    /// Email/phone contact details for a user, if the user exists.
    pub async fn contact(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<UserContact>, sqlx::Error> {
        sqlx::query_as::<_, UserContact>(
            "SELECT id, email, phone FROM users WHERE id = $1 AND is_active = true",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
