use crate::integration::init_tracing;
use crate::utils::MockSignalSink;
use axum::extract::ws::Utf8Bytes;
use beacon_core::{ConnectionId, RoomId};
use beacon_server::RoomRegistry;
use std::sync::Arc;

#[tokio::test]
async fn broadcast_reports_exact_delivery_counts() {
    init_tracing();

    let (sink, _rx) = MockSignalSink::new();
    let rooms = RoomRegistry::new(Arc::new(sink.clone()));
    let room = RoomId::from("r1");

    let a = ConnectionId::new();
    let b = ConnectionId::new();
    let c = ConnectionId::new();
    rooms.join(&room, a);
    rooms.join(&room, b);
    rooms.join(&room, c);

    let frame = Utf8Bytes::from_static(r#"{"type":"offer","roomId":"r1","payload":"X"}"#);
    let delivered = rooms.broadcast_except(&room, a, frame.clone()).await;

    assert_eq!(delivered, 2);
    // every other member exactly once, the sender never
    assert_eq!(sink.frames_for(b).await.len(), 1);
    assert_eq!(sink.frames_for(c).await.len(), 1);
    assert!(sink.frames_for(a).await.is_empty());
    assert_eq!(sink.total().await, 2);
}

#[tokio::test]
async fn broadcast_into_empty_registry_is_silent() {
    init_tracing();

    let sink = MockSignalSink::new_stored_only();
    let rooms = RoomRegistry::new(Arc::new(sink.clone()));

    let delivered = rooms
        .broadcast_except(&RoomId::from("nobody-home"), ConnectionId::new(), "{}".into())
        .await;

    assert_eq!(delivered, 0);
    assert_eq!(sink.total().await, 0);
}
