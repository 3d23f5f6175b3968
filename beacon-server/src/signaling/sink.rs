use async_trait::async_trait;
use axum::extract::ws::Utf8Bytes;
use beacon_core::ConnectionId;

/// Outbound seam between the room registry and whatever owns the sockets.
/// Production wires this to the connection registry; tests substitute a
/// capturing mock.
#[async_trait]
pub trait SignalSink: Send + Sync {
    /// Delivers one raw frame to a single connection. Returns false when
    /// the connection is gone or no longer writable.
    async fn deliver(&self, conn: ConnectionId, frame: Utf8Bytes) -> bool;
}
