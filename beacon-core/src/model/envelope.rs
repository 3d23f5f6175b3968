use crate::model::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message kinds the relay routes on. Anything else a client sends folds
/// into `Unknown` and is dropped without closing the connection.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    JoinRoom,
    Offer,
    Answer,
    IceCandidate,
    Joined,
    #[serde(other)]
    Unknown,
}

impl SignalKind {
    /// True for the peer-to-peer negotiation messages the relay forwards.
    pub fn is_negotiation(self) -> bool {
        matches!(self, Self::Offer | Self::Answer | Self::IceCandidate)
    }
}

/// One wire frame as the relay sees it. Only `type` and `roomId` matter for
/// routing; `payload` is an uninterpreted blob and the relay forwards the
/// original frame verbatim rather than re-serializing this struct, so fields
/// it does not model survive the trip.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Messages the server originates itself. Relayed negotiation traffic never
/// goes through this type.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Joined { room_id: RoomId, peers_in_room: usize },
}
