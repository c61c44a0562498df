//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - The insert/update DTOs used by the repositories

pub mod device_token;
pub mod notification;
pub mod preferences;
pub mod user;
