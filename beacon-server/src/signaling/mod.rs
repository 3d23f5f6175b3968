mod router;
mod sink;
mod ws_handler;

pub use router::MessageRouter;
pub use sink::SignalSink;
pub use ws_handler::ws_handler;
