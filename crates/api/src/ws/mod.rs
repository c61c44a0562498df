//! WebSocket transport for the realtime channel.
//!
//! The session bookkeeping lives in `hudur_dispatch::hub`; this module only
//! handles the HTTP upgrade and maps hub messages onto wire frames.

mod handler;

pub use handler::ws_handler;
