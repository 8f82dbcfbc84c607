//! # Trackside Client
//! Keeps a model of tracks, trains, junction nodes and removal effects in
//! sync with a server over a line-oriented text protocol, and turns it into
//! renderable poses once per frame.
//!
//! Everything here runs on the host's frame thread: call
//! [`Client::update`] from the vsync callback with the callback's timestamp.
//! Optional transports do their I/O on background threads and hand results
//! over through queues the client drains without blocking.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub use trackside_shared::{
    ClickModifier, ClientPacket, Coord, CtrlPacket, CurveAdjustment, DVec2, Direction, NodeId,
    NodeKind, RemovalKind, ServerPacket, TrackId, TrainId, WallClock,
};

mod client;
mod client_config;
mod connection;
mod error;
mod frame;
mod interaction;
mod model;
mod motion;

pub mod node_lookup;
pub mod transport;

pub use client::{Client, ConnectionStatus};
pub use client_config::{ClientConfig, TrackSyncPolicy};
pub use error::{ChannelKind, ClientError, DesyncError};
pub use frame::{run_frame, EffectSprite, Frame, NodeMarker, TrainSprite, ViewOrigin};
pub use interaction::click_packets;
pub use model::{
    client_model::ClientModel,
    effect::{derail_remap, Effect, EffectKind, EffectPose, EffectStep, TrainSnapshot},
    node::{Node, NodeCapability},
    path_registry::{PathRegistry, Track},
    train::Train,
};
pub use motion::{is_visible, Kinematics, TrainPose};
pub use node_lookup::{
    LookupError, LookupTicket, NoLookup, NodeLookup, NodeLookupResponse, ResolvedNode,
};
