use hudur_core::CoreError;

/// Error type for dispatch operations.
///
/// Only two things can fail a dispatch: the request itself is invalid, or
/// the notification row cannot be persisted. Channel delivery failures are
/// deliberately absent here; they are swallowed and logged.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A domain-level error, typically request validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The notification (or target resolution query) could not be persisted.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
