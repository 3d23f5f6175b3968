pub mod config;
pub mod heartbeat;
pub mod registry;
pub mod server;
pub mod signaling;

pub use config::RelayConfig;
pub use heartbeat::HeartbeatMonitor;
pub use registry::{ConnectionRegistry, Liveness, RoomRegistry};
pub use server::{RelayState, StatusResponse, app, serve, status_handler};
pub use signaling::{MessageRouter, SignalSink};
