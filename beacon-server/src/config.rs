use beacon_core::RoomId;
use std::net::SocketAddr;
use std::time::Duration;

/// Relay runtime configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    /// Probe period for the heartbeat monitor.
    pub heartbeat_interval: Duration,
    /// When set, every connection is implicitly attached to this room and
    /// clients may skip `join-room` entirely.
    pub global_room: Option<RoomId>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            heartbeat_interval: Duration::from_secs(30),
            global_room: None,
        }
    }
}
