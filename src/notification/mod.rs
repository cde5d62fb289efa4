//! Notification Channels.
//!
//! New paid orders reach the dashboard twice: as a push message and as a
//! Socket.IO `orderUpdated` event. The two channels are unordered and
//! independent; [`hub::NotificationHub`] owns both and turns every delivery
//! into a cache invalidation plus operator alerts.

pub mod alert;
pub mod dedup;
pub mod hub;
pub mod push;
pub mod socket;

#[cfg(test)]
mod tests;

pub use alert::{Alert, AlertSink, ChannelSink};
pub use dedup::NotificationDeduper;
pub use hub::NotificationHub;
pub use push::{Permission, PushChannel, PushState};
pub use socket::{SocketConnection, SocketHandle, SocketState};
