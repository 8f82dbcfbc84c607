use trackside_client::{ClientError, ClientModel, DesyncError, TrackSyncPolicy};
use trackside_shared::{PacketError, ServerPacket};
use trackside_test::TestClient;

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

#[test]
fn removal_of_unknown_train_is_a_desync() {
    let mut model = ClientModel::new(TrackSyncPolicy::Upsert);
    let packet: ServerPacket = "remove\n99 explosion".parse().unwrap();
    assert_eq!(
        model.apply(packet, 0.0),
        Err(ClientError::ProtocolDesync(DesyncError::UnknownTrain {
            train_id: 99
        }))
    );
    assert_eq!(model.effects().count(), 0);
}

#[test]
fn unknown_removal_kind_is_a_desync() {
    let error = ClientError::from("remove\n7 x".parse::<ServerPacket>().unwrap_err());
    assert_eq!(
        error,
        ClientError::ProtocolDesync(DesyncError::Malformed(
            PacketError::UnknownRemovalKind { code: 'x' }
        ))
    );
}

#[test]
fn client_keeps_going_after_bad_messages() {
    init_logging();
    let mut test = TestClient::default();
    test.frame();

    test.receive("track\n1\n3 0;0;100;0 #6CF 10");
    test.receive("train\n7 3 0 1000 forward\ntrain.png");
    test.receive("remove\n99 d");
    test.receive("remove\n7 q");
    test.receive("teleport\n7");
    test.receive("track\n1\n4 0;0;1;1;2;2;3;3;4;4 #000 1");
    test.receive("train\n8 3 0 0 forward\ntrain.png");

    let model = test.client.model();
    assert!(model.train(7).is_some());
    assert!(model.train(8).is_none());
    assert!(model.tracks().get(4).is_none());
    assert_eq!(model.effects().count(), 0);
    assert_eq!(test.frame().trains.len(), 1);
}
