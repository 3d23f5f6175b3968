use crate::config::RelayConfig;
use crate::heartbeat::HeartbeatMonitor;
use crate::registry::{ConnectionRegistry, RoomRegistry};
use crate::signaling::{MessageRouter, ws_handler};
use anyhow::Result;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use beacon_core::ConnectionId;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Shared handles every request task clones.
#[derive(Clone)]
pub struct RelayState {
    pub connections: Arc<ConnectionRegistry>,
    pub rooms: Arc<RoomRegistry>,
    pub router: Arc<MessageRouter>,
}

impl RelayState {
    pub fn new(config: &RelayConfig) -> Self {
        let connections = Arc::new(ConnectionRegistry::new());
        let rooms = Arc::new(RoomRegistry::new(connections.clone()));
        let router = Arc::new(MessageRouter::new(
            connections.clone(),
            rooms.clone(),
            config.global_room.clone(),
        ));

        Self {
            connections,
            rooms,
            router,
        }
    }

    /// Tears one connection down: removes the table entry and reconciles
    /// room membership in the same step, so no member set keeps a dead
    /// reference. Idempotent; the socket task and the heartbeat monitor may
    /// both get here.
    pub fn disconnect(&self, conn: ConnectionId) {
        if let Some(room) = self.connections.unregister(conn) {
            self.rooms.leave(&room, conn);
        }
    }
}

/// Read-only introspection surface; not part of the signaling protocol.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub connections: usize,
    pub rooms: usize,
    pub timestamp: u64,
}

pub async fn status_handler(State(state): State<RelayState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        connections: state.connections.count(),
        rooms: state.rooms.count(),
        timestamp: unix_millis(),
    })
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

pub fn app(state: RelayState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

pub async fn serve(config: RelayConfig) -> Result<()> {
    let state = RelayState::new(&config);

    HeartbeatMonitor::new(
        state.connections.clone(),
        state.rooms.clone(),
        config.heartbeat_interval,
    )
    .spawn();

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "signaling relay listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
