use crate::signaling::SignalSink;
use axum::extract::ws::Utf8Bytes;
use beacon_core::{ConnectionId, RoomId};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Groups connections into named rooms. Rooms are created lazily on first
/// join and deleted eagerly on last leave; an empty room never exists in
/// the table.
pub struct RoomRegistry {
    rooms: DashMap<RoomId, HashSet<ConnectionId>>,
    sink: Arc<dyn SignalSink>,
}

impl RoomRegistry {
    pub fn new(sink: Arc<dyn SignalSink>) -> Self {
        Self {
            rooms: DashMap::new(),
            sink,
        }
    }

    /// Inserts the connection, creating the room on first join. Insertion
    /// is idempotent. Returns the post-insert member count.
    pub fn join(&self, room_id: &RoomId, conn: ConnectionId) -> usize {
        let mut members = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!(room = %room_id, "creating room");
            HashSet::new()
        });
        members.insert(conn);
        members.len()
    }

    /// Removes the connection from the room's member set. Leaving a room
    /// one is not in is a no-op; the room entry is deleted the moment its
    /// member set empties.
    pub fn leave(&self, room_id: &RoomId, conn: ConnectionId) {
        let emptied = match self.rooms.get_mut(room_id) {
            Some(mut members) => {
                members.remove(&conn);
                members.is_empty()
            }
            None => return,
        };
        if emptied
            && self
                .rooms
                .remove_if(room_id, |_, members| members.is_empty())
                .is_some()
        {
            info!(room = %room_id, "room emptied, removing");
        }
    }

    /// Sends the frame to every current member except `sender`, skipping
    /// members whose connection is no longer writable. Returns how many
    /// deliveries succeeded. An unknown room is a normal condition and
    /// yields zero deliveries, never an error.
    pub async fn broadcast_except(
        &self,
        room_id: &RoomId,
        sender: ConnectionId,
        frame: Utf8Bytes,
    ) -> usize {
        // Snapshot the member set so no map guard is held across deliveries.
        let members: Vec<ConnectionId> = match self.rooms.get(room_id) {
            Some(members) => members.iter().copied().collect(),
            None => return 0,
        };

        let mut delivered = 0;
        for member in members {
            if member == sender {
                continue;
            }
            if self.sink.deliver(member, frame.clone()).await {
                delivered += 1;
            } else {
                debug!(room = %room_id, conn = %member, "skipping unwritable member");
            }
        }
        delivered
    }

    pub fn count(&self) -> usize {
        self.rooms.len()
    }

    pub fn member_count(&self, room_id: &RoomId) -> Option<usize> {
        self.rooms.get(room_id).map(|members| members.len())
    }
}
