mod connection;
mod envelope;
mod room;

pub use connection::ConnectionId;
pub use envelope::{Envelope, ServerMessage, SignalKind};
pub use room::RoomId;
