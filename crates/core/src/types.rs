/// All entity identifiers are UUIDs (v4).
pub type UserId = uuid::Uuid;

/// Tenants are identified by UUID as well.
pub type TenantId = uuid::Uuid;

/// Notification row identifier.
pub type NotificationId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
