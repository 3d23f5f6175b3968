mod connections;
mod rooms;

pub use connections::{ConnectionEntry, ConnectionRegistry, Liveness};
pub use rooms::RoomRegistry;
