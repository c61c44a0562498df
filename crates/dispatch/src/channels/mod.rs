//! Delivery channel implementations.
//!
//! Each transport is configured independently from the environment; a
//! channel whose provider is not configured is simply not mounted, and the
//! engine dispatches to whatever subset is available.

pub mod email;
pub mod push;
pub mod realtime;
pub mod sms;

pub use email::{EmailChannel, EmailConfig};
pub use push::{PushChannel, PushConfig};
pub use realtime::RealtimeChannel;
pub use sms::{SmsChannel, SmsConfig};
