//! # Trackside Shared
//! Curve math and wire packets shared between the trackside client core and
//! its test harness.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod curve;
mod packet;
mod types;

pub use curve::{
    derivative, heading_degrees, point, radius_of_curvature, rough_length,
    rough_length_with_samples, second_derivative, tie_parameters, CurveError, Degree,
    ROUGH_LENGTH_SAMPLES,
};
pub use glam::DVec2;
pub use packet::{
    client_packet::{ClickModifier, ClientPacket},
    coord::Coord,
    ctrl_packet::{CtrlPacket, CurveAdjustment},
    direction::Direction,
    error::PacketError,
    node_kind::NodeKind,
    removal_kind::RemovalKind,
    server_packet::{ServerPacket, TrackRecord, TrainRecord},
};
pub use types::{Color, EffectSerial, NodeId, TrackId, TrainId, WallClock};
