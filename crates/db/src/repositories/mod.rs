//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod device_token_repo;
pub mod notification_repo;
pub mod preference_repo;
pub mod user_repo;

pub use device_token_repo::DeviceTokenRepo;
pub use notification_repo::NotificationRepo;
pub use preference_repo::PreferenceRepo;
pub use user_repo::UserRepo;
