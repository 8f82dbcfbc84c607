use trackside_client::{ChannelKind, ClientError, ViewOrigin};
use trackside_shared::{ClickModifier, Coord, CtrlPacket, CurveAdjustment, DVec2, NodeKind};
use trackside_test::TestClient;

fn client_with_trains() -> TestClient {
    let mut test = TestClient::default();
    test.frame();
    test.receive("track\n1\n3 0;0;1000;0 #6CF 10");
    test.receive("train\n7 3 0.1 1000 forward\ntrain.png");
    test.receive("train\n8 3 0.5 1000 forward\ntrain.png");
    test
}

#[test]
fn click_sends_exact_wire_text() {
    let mut test = client_with_trains();
    let frame = test.frame();

    let modifier = ClickModifier {
        ctrl: true,
        shift: false,
        alt: true,
    };
    let sent = test
        .client
        .click(&frame, DVec2::new(110.0, 20.0), modifier)
        .unwrap();
    assert_eq!(sent, 1);
    assert_eq!(test.data.take_sent(), vec!["click\n7 1,0,1".to_string()]);
}

#[test]
fn click_uses_view_origin() {
    let mut test = client_with_trains();
    let frame = test.client.update(test.now, ViewOrigin::new(400.0, 0.0));

    // screen x 100 is world x 500, where train 8 is
    test.client
        .click(&frame, DVec2::new(100.0, 0.0), ClickModifier::default())
        .unwrap();
    assert_eq!(test.data.take_sent(), vec!["click\n8 0,0,0".to_string()]);
}

#[test]
fn click_on_empty_space_sends_nothing() {
    let mut test = client_with_trains();
    let frame = test.frame();
    let sent = test
        .client
        .click(&frame, DVec2::new(300.0, 300.0), ClickModifier::default())
        .unwrap();
    assert_eq!(sent, 0);
    assert!(test.data.take_sent().is_empty());
}

#[test]
fn control_commands_go_on_the_control_channel() {
    let mut test = TestClient::default();
    test.frame();

    test.client
        .send_control(&CtrlPacket::NewNode(Coord(10.0, 20.0), NodeKind::Configurable))
        .unwrap();
    test.client
        .send_control(&CtrlPacket::TrackAdjust(
            3,
            CurveAdjustment::ToQuadratic(Coord(5.0, 6.0)),
        ))
        .unwrap();
    test.client.send_control(&CtrlPacket::NewTrain(3, 1.5)).unwrap();

    assert_eq!(
        test.control.take_sent(),
        vec![
            "node_new\n10;20 configurable".to_string(),
            "track_adjust\n3 5;6".to_string(),
            "train_new\n3 1.5".to_string(),
        ]
    );
    assert!(test.data.take_sent().is_empty());
}

#[test]
fn sending_while_disconnected_fails() {
    let mut test = TestClient::default();
    test.data.set_accepting(false);
    test.frame();

    assert_eq!(
        test.client.send_control(&CtrlPacket::NodeDelete(1)),
        Err(ClientError::ConnectionLoss {
            channel: ChannelKind::Control
        })
    );
    let frame = test.frame();
    assert!(frame.degraded);
}
