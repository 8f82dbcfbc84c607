use trackside_shared::{
    derivative, heading_degrees, point, CurveError, DVec2, Direction, WallClock,
};

use crate::model::path_registry::Track;

/// The part of a train that determines where it is at a given time
#[derive(Clone, Debug, PartialEq)]
pub struct Kinematics {
    pub direction: Direction,
    pub phase_offset: f64,
    pub duration_ms: f64,
    /// Wall clock at which the train was (virtually) at `t = 0` of its travel.
    /// Unset until the train is first evaluated.
    spawn_wall_clock: Option<WallClock>,
}

impl Kinematics {
    pub fn new(direction: Direction, phase_offset: f64, duration_ms: f64) -> Self {
        Self {
            direction,
            phase_offset,
            duration_ms,
            spawn_wall_clock: None,
        }
    }

    pub fn spawn_wall_clock(&self) -> Option<WallClock> {
        self.spawn_wall_clock
    }

    /// Anchors the phase at the first observed time. Check-then-set, so
    /// repeated calls leave the first anchor in place.
    pub fn anchor(&mut self, now: WallClock) -> WallClock {
        *self.spawn_wall_clock.get_or_insert_with(|| {
            let travelled = match self.direction {
                Direction::Forward => self.phase_offset,
                Direction::Backward => 1.0 - self.phase_offset,
            };
            now - travelled * self.duration_ms
        })
    }

    /// Curve parameter at `now`, direction applied and unclamped
    pub fn parameter(&mut self, now: WallClock) -> f64 {
        let spawn = self.anchor(now);
        let raw = (now - spawn) / self.duration_ms;
        match self.direction {
            Direction::Forward => raw,
            Direction::Backward => 1.0 - raw,
        }
    }

    /// Forget the anchor, e.g. after the server re-announces the train
    pub(crate) fn reset_anchor(&mut self) {
        self.spawn_wall_clock = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainPose {
    pub t: f64,
    pub position: DVec2,
    pub tangent: DVec2,
    /// Degrees, from the tangent
    pub heading: f64,
}

impl TrainPose {
    pub fn on_track(track: &Track, t: f64) -> Result<Self, CurveError> {
        let position = point(track.control_points(), t)?;
        let tangent = derivative(track.control_points(), t)?;
        Ok(Self {
            t,
            position,
            tangent,
            heading: heading_degrees(tangent),
        })
    }
}

/// Where a train is at `now`. Only the lazy anchor is written.
pub fn evaluate(
    kinematics: &mut Kinematics,
    track: &Track,
    now: WallClock,
) -> Result<TrainPose, CurveError> {
    let t = kinematics.parameter(now);
    TrainPose::on_track(track, t)
}

/// Whether a parameter lies in `[-grace, 1 + grace]`
pub fn is_visible(t: f64, grace: f64) -> bool {
    (-grace..=1.0 + grace).contains(&t)
}
