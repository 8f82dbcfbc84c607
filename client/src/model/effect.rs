use trackside_shared::{
    derivative, heading_degrees, point, CurveError, DVec2, Direction, EffectSerial, RemovalKind,
    TrackId, TrainId, WallClock,
};

use crate::{
    model::{path_registry::PathRegistry, train::Train},
    motion::{Kinematics, TrainPose},
};

const EXPLOSION_MS: f64 = 5000.0;
const VIBRATION_MS: f64 = 1000.0;
const TAKE_OFF_MAX_DISTANCE: f64 = 2000.0;
const DERAIL_BANK_DEGREES: f64 = -22.5;
const DERAIL_MIN_T: f64 = -0.5;
const DERAIL_MAX_T: f64 = 1.5;

/// The animated removals. A silent removal has no effect at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Explosion,
    Derail,
    Vibration,
    TakeOff,
}

impl EffectKind {
    pub fn from_removal(kind: RemovalKind) -> Option<Self> {
        match kind {
            RemovalKind::Explosion => Some(Self::Explosion),
            RemovalKind::Silent => None,
            RemovalKind::Derail => Some(Self::Derail),
            RemovalKind::Vibrate => Some(Self::Vibration),
            RemovalKind::TakeOff => Some(Self::TakeOff),
        }
    }
}

/// The train as it was when it was removed
#[derive(Clone, Debug, PartialEq)]
pub struct TrainSnapshot {
    pub id: TrainId,
    pub track_id: TrackId,
    pub image_url: String,
    pub kinematics: Kinematics,
    pub exit: TrainPose,
}

impl TrainSnapshot {
    pub(crate) fn capture(train: Train, exit: TrainPose) -> Self {
        Self {
            id: train.id(),
            track_id: train.track_id(),
            image_url: train.image_url().to_string(),
            kinematics: train.kinematics,
            exit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectPose {
    pub position: DVec2,
    /// Degrees
    pub heading: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectStep {
    Active(EffectPose),
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    serial: EffectSerial,
    kind: EffectKind,
    start_wall_clock: Option<WallClock>,
    origin: DVec2,
    exit_tangent: DVec2,
    train: TrainSnapshot,
}

impl Effect {
    pub(crate) fn spawn(serial: EffectSerial, kind: EffectKind, train: TrainSnapshot) -> Self {
        Self {
            serial,
            kind,
            start_wall_clock: None,
            origin: train.exit.position,
            exit_tangent: train.exit.tangent,
            train,
        }
    }

    pub fn serial(&self) -> EffectSerial {
        self.serial
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn exit_tangent(&self) -> DVec2 {
        self.exit_tangent
    }

    pub fn train(&self) -> &TrainSnapshot {
        &self.train
    }

    pub fn start_wall_clock(&self) -> Option<WallClock> {
        self.start_wall_clock
    }

    /// Advances the animation to `now`. Only the lazy start clock (and the
    /// snapshot's lazy spawn clock) are written.
    pub fn step(&mut self, tracks: &PathRegistry, now: WallClock) -> Result<EffectStep, CurveError> {
        let start = *self.start_wall_clock.get_or_insert(now);
        let elapsed = now - start;

        match self.kind {
            EffectKind::Explosion => Ok(self.explosion(elapsed)),
            EffectKind::Derail => self.derail(tracks, now),
            EffectKind::Vibration => Ok(self.vibration(elapsed)),
            EffectKind::TakeOff => Ok(self.take_off(elapsed)),
        }
    }

    fn explosion(&self, elapsed: f64) -> EffectStep {
        if elapsed > EXPLOSION_MS {
            return EffectStep::Finished;
        }
        EffectStep::Active(EffectPose {
            position: self.origin,
            heading: 0.0,
        })
    }

    fn derail(&mut self, tracks: &PathRegistry, now: WallClock) -> Result<EffectStep, CurveError> {
        let Some(track) = tracks.get(self.train.track_id) else {
            return Ok(EffectStep::Finished);
        };

        let raw = self.train.kinematics.parameter(now);
        if !(DERAIL_MIN_T..=DERAIL_MAX_T).contains(&raw) {
            return Ok(EffectStep::Finished);
        }

        let t = derail_remap(raw);
        let cp = track.control_points();
        let position = point(cp, t)?;
        let tangent = derivative(cp, t)?;
        let bank = derail_bank(t, self.train.kinematics.direction);

        Ok(EffectStep::Active(EffectPose {
            position,
            heading: heading_degrees(tangent) + bank,
        }))
    }

    fn vibration(&self, elapsed: f64) -> EffectStep {
        if elapsed > VIBRATION_MS {
            return EffectStep::Finished;
        }

        let x = elapsed / 333.0;
        let angle = 90.0 * (20.0 / (x + 6.0 - 9.25) + 1.0).sin() * x.sqrt() / 3.0;
        let distance = 50.0 * elapsed / 1000.0;
        let direction =
            (self.exit_tangent * self.train.kinematics.direction.sign()).normalize_or_zero();

        EffectStep::Active(EffectPose {
            position: self.origin + direction * distance,
            heading: heading_degrees(self.exit_tangent) + angle,
        })
    }

    fn take_off(&self, elapsed: f64) -> EffectStep {
        let distance = 250.0 * ((elapsed / 600.0).exp() - 1.0);
        if distance > TAKE_OFF_MAX_DISTANCE {
            return EffectStep::Finished;
        }

        let normal = (-self.exit_tangent.perp()).normalize_or_zero();
        EffectStep::Active(EffectPose {
            position: self.origin + normal * distance,
            heading: heading_degrees(self.exit_tangent),
        })
    }
}

/// Maps a parameter past either end of the track onto a decelerating drift.
/// Values inside `[0, 1]` are returned unchanged.
pub fn derail_remap(t: f64) -> f64 {
    if t > 1.0 {
        (5.0 * t - 4.0).ln() / 5.0 + 1.0
    } else if t < 0.0 {
        -(1.0 - 5.0 * t).ln() / 5.0
    } else {
        t
    }
}

fn derail_bank(t: f64, direction: Direction) -> f64 {
    let sign = direction.sign();
    t * DERAIL_BANK_DEGREES * (sign + 1.0) + (1.0 - t) * DERAIL_BANK_DEGREES * (sign - 1.0)
}
