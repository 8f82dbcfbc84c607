use trackside_client::{derail_remap, ClientConfig, Direction, EffectKind, TrackSyncPolicy};
use trackside_shared::point;
use trackside_test::TestClient;

const LINE: [f64; 4] = [0.0, 0.0, 100.0, 0.0];

fn client_with_train(config: ClientConfig, phase_offset: f64) -> TestClient {
    client_with_directed_train(config, phase_offset, Direction::Forward)
}

fn client_with_directed_train(
    config: ClientConfig,
    phase_offset: f64,
    direction: Direction,
) -> TestClient {
    let mut test = TestClient::new(config);
    test.frame();
    test.receive("track\n1\n3 0;0;100;0 #6CF 10");
    test.receive(&format!(
        "train\n7 3 {} 1000 {}\ntrain.png",
        phase_offset, direction
    ));
    test
}

#[test]
fn derail_removal_spawns_one_effect() {
    let mut test = client_with_train(ClientConfig::default(), 0.5);
    test.advance(100.0);

    let frame = test.receive("remove\n7 d");
    let model = test.client.model();
    assert!(model.train(7).is_none());
    assert!(frame.trains.is_empty());

    let effects: Vec<_> = model.effects().collect();
    assert_eq!(effects.len(), 1);
    let effect = effects[0];
    assert_eq!(effect.kind(), EffectKind::Derail);
    assert_eq!(effect.train().id, 7);
    assert_eq!(effect.train().track_id, 3);

    // exit pose is the train's pose when the removal was applied
    let exit = point(&LINE, 0.6).unwrap();
    assert!(effect.origin().distance(exit) < 1e-9);
    assert_eq!(effect.exit_tangent().x, 100.0);
    assert_eq!(frame.effects.len(), 1);
}

#[test]
fn derail_drifts_off_the_end_of_the_track() {
    let mut test = client_with_train(ClientConfig::default(), 0.9);
    test.advance(50.0);
    test.receive("remove\n7 derail");

    // anchored at -900, so raw t is 1.2 at 300
    test.now = 300.0;
    let frame = test.frame();
    assert_eq!(frame.effects.len(), 1);
    let remapped = derail_remap(1.2);
    assert!((remapped - 1.1386).abs() < 1e-4);
    assert!((frame.effects[0].pose.position.x - remapped * 100.0).abs() < 1e-9);
    // forward trains bank away from the track as they leave it
    assert!((frame.effects[0].pose.heading + 45.0 * remapped).abs() < 1e-9);

    test.now = 601.0;
    assert!(test.frame().effects.is_empty());
}

#[test]
fn backward_derail_drifts_off_the_start_of_the_track() {
    let mut test = client_with_directed_train(ClientConfig::default(), 0.1, Direction::Backward);
    test.receive("remove\n7 d");

    // anchored at -900, so raw t is 1 - 1.2 at 300
    test.now = 300.0;
    let frame = test.frame();
    assert_eq!(frame.effects.len(), 1);
    let remapped = derail_remap(-0.2);
    assert!((remapped + 2f64.ln() / 5.0).abs() < 1e-12);

    let pose = frame.effects[0].pose;
    assert!((pose.position.x + 13.8629).abs() < 1e-4);
    assert!((pose.position.x - remapped * 100.0).abs() < 1e-9);
    assert!((pose.heading - 45.0 * (1.0 - remapped)).abs() < 1e-9);
    assert!((pose.heading - 51.2383).abs() < 1e-4);

    // raw t leaves [-0.5, 1.5] after 1.5 durations past the anchor
    test.now = 601.0;
    assert!(test.frame().effects.is_empty());
}

#[test]
fn derail_ends_when_its_track_goes_away() {
    let config = ClientConfig {
        track_sync: TrackSyncPolicy::Replace,
        ..ClientConfig::default()
    };
    let mut test = client_with_train(config, 0.5);
    let frame = test.receive("remove\n7 d");
    assert_eq!(frame.effects.len(), 1);

    let frame = test.receive("track\n1\n9 0;0;1;1 #000 1");
    assert!(frame.effects.is_empty());
    assert_eq!(test.client.model().effects().count(), 0);
}

#[test]
fn vibration_is_gone_after_one_second() {
    let mut test = client_with_train(ClientConfig::default(), 0.5);
    test.advance(20.0);
    let frame = test.receive("remove\n7 vibrate");
    assert_eq!(frame.effects[0].kind, EffectKind::Vibration);

    assert_eq!(test.advance(1000.0).effects.len(), 1);
    assert!(test.advance(1.0).effects.is_empty());
}

#[test]
fn vibration_shakes_while_sliding_forward() {
    let mut test = client_with_train(ClientConfig::default(), 0.5);
    test.advance(20.0);
    test.receive("remove\n7 v");

    let pose = test.advance(500.0).effects[0].pose;
    let x: f64 = 500.0 / 333.0;
    let shake = 90.0 * (20.0 / (x + 6.0 - 9.25) + 1.0).sin() * x.sqrt() / 3.0;
    assert!((pose.heading - shake).abs() < 1e-9);
    // exits at t = 0.52, then slides 50 units per second along the exit tangent
    assert!((pose.position.x - 77.0).abs() < 1e-9);
    assert!(pose.position.y.abs() < 1e-9);
}

#[test]
fn explosion_lasts_five_seconds() {
    let mut test = client_with_train(ClientConfig::default(), 0.5);
    let frame = test.receive("remove\n7 explosion");
    assert_eq!(frame.effects[0].kind, EffectKind::Explosion);
    assert_eq!(frame.effects[0].pose.heading, 0.0);

    assert_eq!(test.advance(5000.0).effects.len(), 1);
    assert!(test.advance(1.0).effects.is_empty());
}

#[test]
fn take_off_climbs_away_from_the_track() {
    let mut test = client_with_train(ClientConfig::default(), 0.5);
    test.receive("remove\n7 take_off");

    let frame = test.advance(600.0);
    let pose = frame.effects[0].pose;
    assert!((pose.position.x - 50.0).abs() < 1e-9);
    assert!(pose.position.y < -400.0);

    assert!(test.advance(800.0).effects.is_empty());
}

#[test]
fn silent_removal_leaves_nothing() {
    let mut test = client_with_train(ClientConfig::default(), 0.5);
    let frame = test.receive("remove\n7 silent");
    assert!(frame.effects.is_empty());
    assert!(test.client.model().train(7).is_none());
}

#[test]
fn serials_increase_across_effects() {
    let mut test = client_with_train(ClientConfig::default(), 0.5);
    test.receive("train\n8 3 0.2 1000 forward\ntrain.png");
    test.receive("remove\n7 e");
    test.receive("remove\n8 e");

    let serials: Vec<_> = test.client.model().effects().map(|e| e.serial()).collect();
    assert_eq!(serials.len(), 2);
    assert!(serials[0] < serials[1]);
}
