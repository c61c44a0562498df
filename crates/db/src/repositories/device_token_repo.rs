//! Repository for the `device_tokens` table.

use hudur_core::types::UserId;
use hudur_core::Platform;
use sqlx::PgPool;

use crate::models::device_token::DeviceToken;

/// Column list for `device_tokens` queries.
const COLUMNS: &str = "id, user_id, token, platform, is_active, created_at, updated_at";

/// Provides register/deactivate/lookup operations for push device tokens.
pub struct DeviceTokenRepo;

impl DeviceTokenRepo {
    /// All active tokens for a user, the fan-out targets of one push delivery.
    pub async fn list_active(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<DeviceToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM device_tokens \
             WHERE user_id = $1 AND is_active = true \
             ORDER BY created_at"
        );
        sqlx::query_as::<_, DeviceToken>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Register a device token, re-activating it if it already exists.
    pub async fn register(
        pool: &PgPool,
        user_id: UserId,
        token: &str,
        platform: Platform,
    ) -> Result<DeviceToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO device_tokens (user_id, token, platform) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, token) DO UPDATE SET \
                is_active = true, \
                platform = EXCLUDED.platform, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DeviceToken>(&query)
            .bind(user_id)
            .bind(token)
            .bind(platform.as_str())
            .fetch_one(pool)
            .await
    }

    /// Deactivate a token. Returns `false` when the token is unknown.
    pub async fn deactivate(
        pool: &PgPool,
        user_id: UserId,
        token: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE device_tokens \
             SET is_active = false, updated_at = NOW() \
             WHERE user_id = $1 AND token = $2",
        )
        .bind(user_id)
        .bind(token)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
