use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{attach_peer, expect_joined, join_room_frame, next_text};
use axum::extract::State;
use beacon_core::RoomId;
use beacon_server::status_handler;

/// The full robot/operator signaling session, end to end.
#[tokio::test]
async fn robot_and_operator_negotiate_through_one_room() {
    init_tracing();

    let state = create_test_relay();
    let (robot, mut robot_rx) = attach_peer(&state);
    let (operator, mut operator_rx) = attach_peer(&state);

    state.router.handle(robot, join_room_frame("r1", "robot")).await;
    let (room, peers) = expect_joined(&mut robot_rx);
    assert_eq!(room, RoomId::from("r1"));
    assert_eq!(peers, 1);

    state
        .router
        .handle(operator, join_room_frame("r1", "operator"))
        .await;
    let (_, peers) = expect_joined(&mut operator_rx);
    assert_eq!(peers, 2);

    let offer = r#"{"type":"offer","roomId":"r1","senderId":"operator","payload":"X"}"#;
    state.router.handle(operator, offer.into()).await;
    assert_eq!(next_text(&mut robot_rx).as_deref(), Some(offer));
    assert!(next_text(&mut operator_rx).is_none());

    // robot drops; the room survives with the operator in it
    state.disconnect(robot);
    let status = status_handler(State(state.clone())).await.0;
    assert_eq!(status.status, "ok");
    assert_eq!(status.connections, 1);
    assert_eq!(status.rooms, 1);

    // operator drops too; the room is gone
    state.disconnect(operator);
    let status = status_handler(State(state.clone())).await.0;
    assert_eq!(status.connections, 0);
    assert_eq!(status.rooms, 0);
}
