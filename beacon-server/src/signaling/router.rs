use crate::registry::{ConnectionRegistry, RoomRegistry};
use axum::extract::ws::Utf8Bytes;
use beacon_core::{ConnectionId, Envelope, RoomId, ServerMessage, SignalKind};
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

/// Parses inbound envelopes and dispatches them by type. Payloads are never
/// inspected; negotiation messages are forwarded as the original frame so
/// fields the relay does not model survive intact.
pub struct MessageRouter {
    connections: Arc<ConnectionRegistry>,
    rooms: Arc<RoomRegistry>,
    default_room: Option<RoomId>,
}

impl MessageRouter {
    pub fn new(
        connections: Arc<ConnectionRegistry>,
        rooms: Arc<RoomRegistry>,
        default_room: Option<RoomId>,
    ) -> Self {
        Self {
            connections,
            rooms,
            default_room,
        }
    }

    /// Implicit attachment for deployments running a single global room.
    /// Without a configured global room this does nothing.
    pub fn on_connect(&self, conn: ConnectionId) {
        let Some(room) = self.default_room.clone() else {
            return;
        };
        self.rooms.join(&room, conn);
        self.connections.set_room(conn, room, None);
    }

    pub async fn handle(&self, conn: ConnectionId, raw: Utf8Bytes) {
        let envelope = match serde_json::from_str::<Envelope>(raw.as_str()) {
            Ok(envelope) => envelope,
            Err(e) => {
                // one peer's garbage must not disrupt anyone: drop, keep open
                warn!(conn = %conn, error = %e, "discarding malformed envelope");
                return;
            }
        };

        match envelope.kind {
            SignalKind::JoinRoom => self.handle_join(conn, envelope),
            kind if kind.is_negotiation() => self.relay(conn, raw).await,
            kind => trace!(conn = %conn, ?kind, "ignoring unroutable message type"),
        }
    }

    fn handle_join(&self, conn: ConnectionId, envelope: Envelope) {
        let Some(room) = envelope.room_id.or_else(|| self.default_room.clone()) else {
            warn!(conn = %conn, "join-room without roomId, dropping");
            return;
        };

        // Re-joining the same room is idempotent; a different room migrates
        // the connection out of its previous one.
        if let Some(previous) = self.connections.set_room(conn, room.clone(), envelope.sender_id) {
            debug!(conn = %conn, from = %previous, to = %room, "connection migrating rooms");
            self.rooms.leave(&previous, conn);
        }
        let peers_in_room = self.rooms.join(&room, conn);
        info!(conn = %conn, room = %room, peers = peers_in_room, "joined room");

        let ack = ServerMessage::Joined {
            room_id: room,
            peers_in_room,
        };
        match serde_json::to_string(&ack) {
            Ok(json) => {
                if !self.connections.deliver(conn, json.into()) {
                    debug!(conn = %conn, "joiner disconnected before ack");
                }
            }
            Err(e) => error!(error = %e, "failed to serialize joined ack"),
        }
    }

    async fn relay(&self, conn: ConnectionId, raw: Utf8Bytes) {
        let Some(room) = self
            .connections
            .room_of(conn)
            .or_else(|| self.default_room.clone())
        else {
            debug!(conn = %conn, "negotiation message before any join, dropping");
            return;
        };

        let delivered = self.rooms.broadcast_except(&room, conn, raw).await;
        trace!(conn = %conn, room = %room, delivered, "relayed negotiation message");
    }
}
