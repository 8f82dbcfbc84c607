use trackside_shared::{TrackId, TrainId, TrainRecord};

use crate::motion::Kinematics;

#[derive(Clone, Debug, PartialEq)]
pub struct Train {
    id: TrainId,
    track_id: TrackId,
    image_url: String,
    pub(crate) kinematics: Kinematics,
}

impl Train {
    pub fn from_record(record: TrainRecord) -> Self {
        Self {
            id: record.id,
            track_id: record.track_id,
            image_url: record.image_url,
            kinematics: Kinematics::new(record.direction, record.phase_offset, record.duration_ms),
        }
    }

    /// Applies a repeated announcement in place. The phase is re-anchored at
    /// the next evaluation.
    pub(crate) fn update(&mut self, record: TrainRecord) {
        self.track_id = record.track_id;
        self.image_url = record.image_url;
        self.kinematics.direction = record.direction;
        self.kinematics.phase_offset = record.phase_offset;
        self.kinematics.duration_ms = record.duration_ms;
        self.kinematics.reset_anchor();
    }

    pub fn id(&self) -> TrainId {
        self.id
    }

    pub fn track_id(&self) -> TrackId {
        self.track_id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }
}
