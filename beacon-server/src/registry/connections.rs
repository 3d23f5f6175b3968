use crate::signaling::SignalSink;
use async_trait::async_trait;
use axum::extract::ws::{Message, Utf8Bytes};
use beacon_core::{ConnectionId, RoomId};
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

/// Per-connection liveness state, driven by the heartbeat monitor.
///
/// `Alive → AwaitingPong` on each probe; any inbound traffic returns the
/// connection to `Alive`. A connection still `AwaitingPong` at the next
/// probe is evicted.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Liveness {
    #[default]
    Alive,
    AwaitingPong,
}

/// Bookkeeping for one accepted socket. The registry owns the entry; the
/// room registry only ever refers to it by id.
pub struct ConnectionEntry {
    tx: mpsc::UnboundedSender<Message>,
    pub sender_id: Option<String>,
    pub room: Option<RoomId>,
    pub liveness: Liveness,
}

impl ConnectionEntry {
    /// Queues a frame on the connection's outbound channel. Returns false
    /// once the socket task has gone away.
    pub fn send(&self, msg: Message) -> bool {
        self.tx.send(msg).is_ok()
    }
}

/// Table of every live connection. All mutation goes through these methods;
/// each operation is atomic at entry granularity.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ConnectionEntry>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a process-unique id to an accepted socket. Cannot fail.
    pub fn register(&self, tx: mpsc::UnboundedSender<Message>) -> ConnectionId {
        let id = ConnectionId::new();
        self.connections.insert(
            id,
            ConnectionEntry {
                tx,
                sender_id: None,
                room: None,
                liveness: Liveness::Alive,
            },
        );
        debug!(conn = %id, "connection registered");
        id
    }

    /// Removes the connection, returning the room it was in so the caller
    /// can reconcile the room registry. Idempotent.
    pub fn unregister(&self, id: ConnectionId) -> Option<RoomId> {
        self.connections.remove(&id).and_then(|(_, entry)| entry.room)
    }

    /// Called whenever the connection proves responsiveness: data received
    /// or a heartbeat pong.
    pub fn mark_alive(&self, id: ConnectionId) {
        if let Some(mut entry) = self.connections.get_mut(&id) {
            entry.liveness = Liveness::Alive;
        }
    }

    /// Records the room a connection joined, along with its self-reported
    /// sender id. Returns the previous room when the connection migrates so
    /// the caller can leave it.
    pub fn set_room(
        &self,
        id: ConnectionId,
        room: RoomId,
        sender_id: Option<String>,
    ) -> Option<RoomId> {
        let mut entry = self.connections.get_mut(&id)?;
        if sender_id.is_some() {
            entry.sender_id = sender_id;
        }
        let previous = entry.room.replace(room);
        previous.filter(|prev| Some(prev) != entry.room.as_ref())
    }

    pub fn room_of(&self, id: ConnectionId) -> Option<RoomId> {
        self.connections.get(&id).and_then(|entry| entry.room.clone())
    }

    /// Visits every live connection with mutable access to its entry.
    /// Callers must not register or unregister from inside the visitor.
    pub fn for_each(&self, mut visit: impl FnMut(ConnectionId, &mut ConnectionEntry)) {
        for mut entry in self.connections.iter_mut() {
            let id = *entry.key();
            visit(id, entry.value_mut());
        }
    }

    pub fn count(&self) -> usize {
        self.connections.len()
    }

    /// Queues one raw text frame. Returns false when the connection is gone
    /// or no longer writable.
    pub fn deliver(&self, id: ConnectionId, frame: Utf8Bytes) -> bool {
        match self.connections.get(&id) {
            Some(entry) => entry.send(Message::Text(frame)),
            None => false,
        }
    }

    /// Asks the socket task to close the connection.
    pub fn close(&self, id: ConnectionId) {
        if let Some(entry) = self.connections.get(&id) {
            let _ = entry.send(Message::Close(None));
        }
    }
}

#[async_trait]
impl SignalSink for ConnectionRegistry {
    async fn deliver(&self, conn: ConnectionId, frame: Utf8Bytes) -> bool {
        ConnectionRegistry::deliver(self, conn, frame)
    }
}
