pub mod model;

pub use model::{ConnectionId, Envelope, RoomId, ServerMessage, SignalKind};
