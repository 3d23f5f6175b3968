use crate::registry::{ConnectionRegistry, Liveness, RoomRegistry};
use axum::extract::ws::Message;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Detects half-open sockets that never produce a close event. Each tick
/// moves every connection to `AwaitingPong` and sends a protocol-level ping;
/// a connection that is still `AwaitingPong` at the next tick is forcibly
/// evicted and removed from its room.
pub struct HeartbeatMonitor {
    connections: Arc<ConnectionRegistry>,
    rooms: Arc<RoomRegistry>,
    interval: Duration,
}

impl HeartbeatMonitor {
    pub fn new(
        connections: Arc<ConnectionRegistry>,
        rooms: Arc<RoomRegistry>,
        interval: Duration,
    ) -> Self {
        Self {
            connections,
            rooms,
            interval,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        info!(interval = ?self.interval, "heartbeat monitor started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.sweep();
        }
    }

    /// One monitor pass over every tracked connection. Returns how many
    /// connections were evicted.
    pub fn sweep(&self) -> usize {
        let mut stale = Vec::new();

        self.connections.for_each(|id, entry| match entry.liveness {
            Liveness::AwaitingPong => stale.push(id),
            Liveness::Alive => {
                entry.liveness = Liveness::AwaitingPong;
                let _ = entry.send(Message::Ping(Bytes::new()));
            }
        });

        for &id in &stale {
            warn!(conn = %id, "no pong since last probe, evicting");
            self.connections.close(id);
            if let Some(room) = self.connections.unregister(id) {
                self.rooms.leave(&room, id);
            }
        }

        stale.len()
    }
}
