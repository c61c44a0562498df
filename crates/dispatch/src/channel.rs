//! The uniform delivery channel contract.

use async_trait::async_trait;
use hudur_core::Channel;
use hudur_db::models::notification::Notification;

/// Error type for a single channel delivery.
///
/// Never escapes the dispatch engine: attempts are logged and folded into
/// [`DeliveryAttempt`]s.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The underlying HTTP request failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider returned HTTP {0}")]
    HttpStatus(u16),

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The user has no contact detail of the required kind on file.
    #[error("No {0} on file for user")]
    MissingContact(&'static str),

    /// Contact or token lookup failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Every sub-delivery of a fan-out (e.g. all device tokens) failed.
    #[error("All {0} deliveries failed")]
    AllFailed(&'static str),
}

/// One delivery transport.
///
/// Implementations are independently fallible and must never panic on
/// provider errors; the engine invokes all eligible channels concurrently
/// and treats each outcome in isolation.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// The identity this channel reports in logs and attempts.
    fn id(&self) -> Channel;

    /// Deliver one notification to its owning user over this transport.
    async fn deliver(&self, notification: &Notification) -> Result<(), ChannelError>;
}

/// The ephemeral outcome of invoking one channel for one notification.
///
/// Only ever used for logging and bulk bookkeeping; never persisted.
#[derive(Debug, Clone)]
pub struct DeliveryAttempt {
    pub channel: Channel,
    pub ok: bool,
    pub error: Option<String>,
}

impl DeliveryAttempt {
    pub fn success(channel: Channel) -> Self {
        Self {
            channel,
            ok: true,
            error: None,
        }
    }

    pub fn failure(channel: Channel, error: impl Into<String>) -> Self {
        Self {
            channel,
            ok: false,
            error: Some(error.into()),
        }
    }
}
