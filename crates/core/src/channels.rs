//! Delivery channel identifiers.
//!
//! A channel is one delivery transport. The dispatch engine treats channels
//! polymorphically; this enum is the identity each implementation reports
//! and the value logged with every delivery attempt.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One delivery transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Push,
    Realtime,
}

impl Channel {
    /// Every known channel, in dispatch order.
    pub const ALL: [Channel; 4] = [
        Channel::Email,
        Channel::Sms,
        Channel::Push,
        Channel::Realtime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Push => "push",
            Channel::Realtime => "realtime",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
