//! HTTP handler implementations, grouped by resource.

pub mod device;
pub mod dispatch;
pub mod notification;
pub mod preferences;
