//! Repository for the `notifications` table.

use hudur_core::types::{NotificationId, UserId};
use sqlx::{PgPool, QueryBuilder};

use crate::models::notification::{NewNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, tenant_id, user_id, category, priority, title, message, data, \
    action_url, image_url, is_read, read_at, expires_at, is_deleted, deleted_at, created_at";

/// Filter shared by every read path: soft-deleted and expired rows are
/// invisible (expired rows stay in the table for external housekeeping).
const VISIBLE: &str = "is_deleted = false AND (expires_at IS NULL OR expires_at > NOW())";

/// Single-row insert statement.
fn insert_sql() -> String {
    format!(
        "INSERT INTO notifications \
            (tenant_id, user_id, category, priority, title, message, data, \
             action_url, image_url, expires_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING {COLUMNS}"
    )
}

/// User-facing listing, newest first, optionally unread-only.
fn list_sql(unread_only: bool) -> String {
    let filter = if unread_only {
        "AND is_read = false"
    } else {
        ""
    };
    format!(
        "SELECT {COLUMNS} FROM notifications \
         WHERE user_id = $1 AND {VISIBLE} {filter} \
         ORDER BY created_at DESC \
         LIMIT $2 OFFSET $3"
    )
}

/// Unread badge count; counts only visible rows.
fn unread_count_sql() -> String {
    format!(
        "SELECT COUNT(*) FROM notifications \
         WHERE user_id = $1 AND is_read = false AND {VISIBLE}"
    )
}

/// Single-row read marker. `COALESCE` keeps the first `read_at` when the
/// same notification is marked again.
const MARK_READ_SQL: &str = "UPDATE notifications \
    SET is_read = true, read_at = COALESCE(read_at, NOW()) \
    WHERE id = $1 AND user_id = $2 AND is_deleted = false";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a single notification row, returning the stored row.
    pub async fn insert(pool: &PgPool, new: &NewNotification) -> Result<Notification, sqlx::Error> {
        sqlx::query_as::<_, Notification>(&insert_sql())
            .bind(new.tenant_id)
            .bind(new.user_id)
            .bind(new.category.as_str())
            .bind(new.priority.as_str())
            .bind(&new.title)
            .bind(&new.message)
            .bind(&new.data)
            .bind(&new.action_url)
            .bind(&new.image_url)
            .bind(new.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Batch-insert one row per entry in a single statement.
    ///
    /// Used by bulk dispatch so persistence of the whole target set is one
    /// round-trip that either fully succeeds or fully fails.
    pub async fn insert_many(
        pool: &PgPool,
        rows: &[NewNotification],
    ) -> Result<Vec<Notification>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(
            "INSERT INTO notifications \
                (tenant_id, user_id, category, priority, title, message, data, \
                 action_url, image_url, expires_at) ",
        );
        builder.push_values(rows, |mut b, new| {
            b.push_bind(new.tenant_id)
                .push_bind(new.user_id)
                .push_bind(new.category.as_str())
                .push_bind(new.priority.as_str())
                .push_bind(&new.title)
                .push_bind(&new.message)
                .push_bind(&new.data)
                .push_bind(&new.action_url)
                .push_bind(&new.image_url)
                .push_bind(new.expires_at);
        });
        builder.push(format!(" RETURNING {COLUMNS}"));

        builder
            .build_query_as::<Notification>()
            .fetch_all(pool)
            .await
    }

    /// List visible notifications for a user, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(&list_sql(unread_only))
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of unread, visible notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: UserId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(&unread_count_sql())
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Mark a single notification as read.
    ///
    /// Idempotent: re-marking an already-read notification keeps the
    /// original `read_at`. Returns `false` only when no visible notification
    /// with that id belongs to the user.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: NotificationId,
        user_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(MARK_READ_SQL)
            .bind(notification_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications that were marked.
    pub async fn mark_all_read(pool: &PgPool, user_id: UserId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE user_id = $1 AND is_read = false AND is_deleted = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Soft-delete a notification.
    ///
    /// Returns `false` when the notification does not exist for the user or
    /// was already deleted.
    pub async fn soft_delete(
        pool: &PgPool,
        notification_id: NotificationId,
        user_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_deleted = true, deleted_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND is_deleted = false",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
