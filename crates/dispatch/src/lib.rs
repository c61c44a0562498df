//! Hudur notification dispatch engine.
//!
//! This crate turns one logical "send notification" request into zero or
//! more concurrent channel deliveries:
//!
//! - [`Dispatcher`] -- single-send engine and bulk coordinator. Persists the
//!   notification row first, then fans out to all eligible channels and
//!   joins the results; channel failures are logged, never propagated.
//! - [`channel`] -- the uniform [`DeliveryChannel`] contract and the
//!   ephemeral per-call [`DeliveryAttempt`] outcome.
//! - [`channels`] -- the four transports (email via SMTP, SMS and push via
//!   provider HTTP APIs, realtime via the in-process session hub).
//! - [`eligibility`] -- the data-driven category/channel gating rules.
//! - [`hub`] -- the realtime session hub shared with the WebSocket layer.

pub mod bulk;
pub mod channel;
pub mod channels;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod hub;
pub mod request;

pub use channel::{ChannelError, DeliveryAttempt, DeliveryChannel};
pub use engine::Dispatcher;
pub use error::DispatchError;
pub use hub::{RealtimeEvent, SessionHub, SessionMessage};
pub use request::{SendBulkNotification, SendNotification};
