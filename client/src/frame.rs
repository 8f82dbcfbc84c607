use log::{trace, warn};

use trackside_shared::{EffectSerial, NodeId, NodeKind, DVec2, TrackId, TrainId, WallClock};

use crate::{
    client_config::ClientConfig,
    model::{
        client_model::ClientModel,
        effect::{EffectKind, EffectPose, EffectStep},
    },
    motion::{self, is_visible, TrainPose},
};

/// Top-left corner of the viewport in world space. Screen coordinates are
/// world coordinates minus the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewOrigin {
    pub x: f64,
    pub y: f64,
}

impl ViewOrigin {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_screen(&self, world: DVec2) -> DVec2 {
        world - DVec2::new(self.x, self.y)
    }

    pub fn to_world(&self, screen: DVec2) -> DVec2 {
        screen + DVec2::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrainSprite {
    pub id: TrainId,
    pub track_id: TrackId,
    pub image_url: String,
    pub pose: TrainPose,
    pub screen: DVec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectSprite {
    pub serial: EffectSerial,
    pub kind: EffectKind,
    pub train_id: TrainId,
    pub image_url: String,
    pub pose: EffectPose,
    pub screen: DVec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeMarker {
    pub id: NodeId,
    pub position: DVec2,
    pub screen: DVec2,
    /// `None` while the node lookup is outstanding
    pub kind: Option<NodeKind>,
    pub interactable: bool,
}

/// What a renderer draws for one vsync tick
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub now: WallClock,
    pub origin: ViewOrigin,
    /// Trains inside the visibility grace band, in id order
    pub trains: Vec<TrainSprite>,
    /// Effects still animating, oldest first
    pub effects: Vec<EffectSprite>,
    pub nodes: Vec<NodeMarker>,
    /// No live connection. Hosts show a placeholder over the last frame.
    pub degraded: bool,
}

/// Computes one frame. Finished effects are dropped from the model; apart
/// from that only lazy clocks are written.
pub fn run_frame(
    model: &mut ClientModel,
    config: &ClientConfig,
    now: WallClock,
    origin: ViewOrigin,
) -> Frame {
    let mut frame = Frame {
        now,
        origin,
        ..Frame::default()
    };

    let tracks = &model.tracks;

    model.effects.retain(|serial, effect| match effect.step(tracks, now) {
        Ok(EffectStep::Active(pose)) => {
            frame.effects.push(EffectSprite {
                serial: *serial,
                kind: effect.kind(),
                train_id: effect.train().id,
                image_url: effect.train().image_url.clone(),
                pose,
                screen: origin.to_screen(pose.position),
            });
            true
        }
        Ok(EffectStep::Finished) => false,
        Err(e) => {
            warn!("Dropping effect {}: {}", serial, e);
            false
        }
    });

    for train in model.trains.values_mut() {
        let Some(track) = tracks.get(train.track_id()) else {
            trace!(
                "Skipping train {}, track {} is not known",
                train.id(),
                train.track_id()
            );
            continue;
        };

        match motion::evaluate(&mut train.kinematics, track, now) {
            Ok(pose) if is_visible(pose.t, config.visibility_grace) => {
                frame.trains.push(TrainSprite {
                    id: train.id(),
                    track_id: train.track_id(),
                    image_url: train.image_url().to_string(),
                    pose,
                    screen: origin.to_screen(pose.position),
                });
            }
            Ok(_) => {}
            Err(e) => warn!("Skipping train {}: {}", train.id(), e),
        }
    }

    frame.nodes = model
        .nodes
        .values()
        .map(|node| NodeMarker {
            id: node.id(),
            position: node.position(),
            screen: origin.to_screen(node.position()),
            kind: node.kind(),
            interactable: node.is_interactable(),
        })
        .collect();

    frame
}
