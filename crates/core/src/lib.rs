//! Shared domain types for the Hudur notification platform.
//!
//! This crate holds the vocabulary the other workspace crates agree on:
//! identifier and timestamp aliases, the notification [`Category`] /
//! [`Channel`] / [`Priority`] enums, the device [`Platform`] enum, and the
//! domain-level [`CoreError`] type.

pub mod category;
pub mod channels;
pub mod error;
pub mod platform;
pub mod types;

pub use category::{Category, Priority};
pub use channels::Channel;
pub use error::CoreError;
pub use platform::Platform;
