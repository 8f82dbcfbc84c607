use proptest::prelude::*;
use trackside_client::{Direction, Kinematics};
use trackside_shared::point;
use trackside_test::TestClient;

const LINE: [f64; 4] = [0.0, 0.0, 100.0, 0.0];

fn client_with_line() -> TestClient {
    let mut test = TestClient::default();
    test.frame();
    test.receive("track\n1\n3 0;0;100;0 #6CF 10");
    test
}

#[test]
fn phase_is_anchored_at_first_frame() {
    let mut test = client_with_line();
    test.now = 1234.0;
    let frame = test.receive("train\n1 3 0 1000 forward\ntrain.png");

    let train = test.client.model().train(1).unwrap();
    assert_eq!(train.kinematics().spawn_wall_clock(), Some(1234.0));
    assert_eq!(frame.trains[0].pose.t, 0.0);
    assert_eq!(frame.trains[0].image_url, "train.png");

    let frame = test.advance(500.0);
    let sprite = &frame.trains[0];
    assert!((sprite.pose.t - 0.5).abs() < 1e-12);
    let expected = point(&LINE, 0.5).unwrap();
    assert!(sprite.pose.position.distance(expected) < 1e-9);
}

#[test]
fn backward_train_starts_at_its_phase() {
    let mut test = client_with_line();
    let frame = test.receive("train\n2 3 0.25 1000 backward\ntrain.png");
    assert!((frame.trains[0].pose.t - 0.25).abs() < 1e-12);

    let frame = test.advance(100.0);
    assert!((frame.trains[0].pose.t - 0.15).abs() < 1e-12);
}

#[test]
fn repeated_train_message_re_anchors() {
    let mut test = client_with_line();
    test.receive("train\n1 3 0 1000 forward\ntrain.png");
    test.advance(400.0);

    let frame = test.receive("train\n1 3 0.1 1000 forward\ntrain.png");
    assert_eq!(frame.trains.len(), 1);
    assert!((frame.trains[0].pose.t - 0.1).abs() < 1e-12);
}

#[test]
fn train_on_unknown_track_is_skipped() {
    let mut test = client_with_line();
    let frame = test.receive("train\n1 42 0 1000 forward\ntrain.png");
    assert!(frame.trains.is_empty());
    assert!(test.client.model().train(1).is_some());

    let frame = test.receive("track\n1\n42 0;0;10;10 #000 2");
    assert_eq!(frame.trains.len(), 1);
}

proptest! {
    #[test]
    fn first_evaluation_lands_on_the_phase(
        phase in 0.0f64..1.0,
        duration in 1.0f64..100_000.0,
        first in -1.0e6f64..1.0e6,
        backward in any::<bool>(),
    ) {
        let direction = if backward { Direction::Backward } else { Direction::Forward };
        let mut kinematics = Kinematics::new(direction, phase, duration);
        prop_assert!((kinematics.parameter(first) - phase).abs() < 1e-6);
    }

    #[test]
    fn anchor_is_set_once(
        phase in 0.0f64..1.0,
        duration in 1.0f64..100_000.0,
        first in -1.0e6f64..1.0e6,
        later in 0.0f64..1.0e6,
        backward in any::<bool>(),
    ) {
        let direction = if backward { Direction::Backward } else { Direction::Forward };
        let mut kinematics = Kinematics::new(direction, phase, duration);
        kinematics.parameter(first);
        let anchor = kinematics.spawn_wall_clock();

        let now = first + later;
        let once = kinematics.parameter(now);
        prop_assert_eq!(kinematics.parameter(now), once);
        prop_assert_eq!(kinematics.spawn_wall_clock(), anchor);
    }
}
