//! Minimal user directory projection.
//!
//! The wider platform owns the user/role tables; the dispatch service only
//! reads the fields it needs for bulk target expansion and channel contact
//! lookup.

use hudur_core::types::UserId;
use sqlx::FromRow;

/// Contact details for one user, consumed by the email and SMS channels.
#[derive(Debug, Clone, FromRow)]
pub struct UserContact {
    pub id: UserId,
    pub email: Option<String>,
    pub phone: Option<String>,
}
