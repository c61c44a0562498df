//! Repository for the `notification_preferences` table.

use hudur_core::types::UserId;
use sqlx::PgPool;

use crate::models::preferences::{NotificationPreferences, UpdatePreferences};

/// Column list for `notification_preferences` queries.
const COLUMNS: &str = "id, user_id, email_enabled, sms_enabled, push_enabled, \
    attendance_enabled, leave_enabled, system_enabled, marketing_enabled, \
    quiet_hours_start, quiet_hours_end, created_at, updated_at";

/// Provides read/upsert operations for per-user notification preferences.
///
/// Reads are side-effect-free; a missing row is materialized as an in-memory
/// default by the caller and is only persisted by an explicit [`upsert`].
///
/// [`upsert`]: PreferenceRepo::upsert
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Fetch the stored preferences for a user, if any.
    pub async fn get(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<NotificationPreferences>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_preferences WHERE user_id = $1");
        sqlx::query_as::<_, NotificationPreferences>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or fully replace the preferences for a user.
    pub async fn upsert(
        pool: &PgPool,
        user_id: UserId,
        prefs: &UpdatePreferences,
    ) -> Result<NotificationPreferences, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_preferences \
                (user_id, email_enabled, sms_enabled, push_enabled, \
                 attendance_enabled, leave_enabled, system_enabled, marketing_enabled, \
                 quiet_hours_start, quiet_hours_end) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (user_id) DO UPDATE SET \
                email_enabled = EXCLUDED.email_enabled, \
                sms_enabled = EXCLUDED.sms_enabled, \
                push_enabled = EXCLUDED.push_enabled, \
                attendance_enabled = EXCLUDED.attendance_enabled, \
                leave_enabled = EXCLUDED.leave_enabled, \
                system_enabled = EXCLUDED.system_enabled, \
                marketing_enabled = EXCLUDED.marketing_enabled, \
                quiet_hours_start = EXCLUDED.quiet_hours_start, \
                quiet_hours_end = EXCLUDED.quiet_hours_end, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationPreferences>(&query)
            .bind(user_id)
            .bind(prefs.email_enabled)
            .bind(prefs.sms_enabled)
            .bind(prefs.push_enabled)
            .bind(prefs.attendance_enabled)
            .bind(prefs.leave_enabled)
            .bind(prefs.system_enabled)
            .bind(prefs.marketing_enabled)
            .bind(prefs.quiet_hours_start)
            .bind(prefs.quiet_hours_end)
            .fetch_one(pool)
            .await
    }
}
