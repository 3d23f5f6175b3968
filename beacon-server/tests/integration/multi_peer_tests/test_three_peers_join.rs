use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{attach_peer, expect_joined, ice_candidate_frame, join_room_frame, next_text};

#[tokio::test]
async fn member_counts_grow_with_each_join() {
    init_tracing();

    let state = create_test_relay();
    let (a, mut a_rx) = attach_peer(&state);
    let (b, mut b_rx) = attach_peer(&state);
    let (c, mut c_rx) = attach_peer(&state);

    state.router.handle(a, join_room_frame("r1", "a")).await;
    state.router.handle(b, join_room_frame("r1", "b")).await;
    state.router.handle(c, join_room_frame("r1", "c")).await;

    assert_eq!(expect_joined(&mut a_rx).1, 1);
    assert_eq!(expect_joined(&mut b_rx).1, 2);
    assert_eq!(expect_joined(&mut c_rx).1, 3);
}

#[tokio::test]
async fn broadcast_reaches_every_other_member_once() {
    init_tracing();

    let state = create_test_relay();
    let (a, mut a_rx) = attach_peer(&state);
    let (b, mut b_rx) = attach_peer(&state);
    let (c, mut c_rx) = attach_peer(&state);

    state.router.handle(a, join_room_frame("r1", "a")).await;
    state.router.handle(b, join_room_frame("r1", "b")).await;
    state.router.handle(c, join_room_frame("r1", "c")).await;
    for rx in [&mut a_rx, &mut b_rx, &mut c_rx] {
        expect_joined(rx);
    }

    state
        .router
        .handle(c, ice_candidate_frame("r1", "c", "candidate:0"))
        .await;

    assert!(next_text(&mut a_rx).is_some());
    assert!(next_text(&mut b_rx).is_some());
    // exactly once each, never back to the sender
    assert!(next_text(&mut a_rx).is_none());
    assert!(next_text(&mut b_rx).is_none());
    assert!(next_text(&mut c_rx).is_none());
}
