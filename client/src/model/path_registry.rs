use std::collections::BTreeMap;

use trackside_shared::{
    rough_length, tie_parameters, Color, CurveError, Degree, TrackId, TrackRecord,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    id: TrackId,
    control_points: Vec<f64>,
    degree: Degree,
    color: Color,
    stroke_width: f64,
    length: f64,
}

impl Track {
    /// Validates the curve degree and derives the rough length
    pub fn new(
        id: TrackId,
        control_points: Vec<f64>,
        color: Color,
        stroke_width: f64,
    ) -> Result<Self, CurveError> {
        let degree = Degree::from_len(control_points.len())?;
        let length = rough_length(&control_points)?;
        Ok(Self {
            id,
            control_points,
            degree,
            color,
            stroke_width,
            length,
        })
    }

    pub fn from_record(record: TrackRecord) -> Result<Self, CurveError> {
        Self::new(
            record.id,
            record.control_points,
            record.color,
            record.stroke_width,
        )
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn control_points(&self) -> &[f64] {
        &self.control_points
    }

    pub fn degree(&self) -> Degree {
        self.degree
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Crosstie positions for renderers, spaced by this track's length
    pub fn tie_parameters(&self) -> Vec<f64> {
        tie_parameters(self.length)
    }
}

/// Id-keyed track map. A miss on [`PathRegistry::get`] means "skip this
/// entity this frame".
#[derive(Clone, Debug, Default)]
pub struct PathRegistry {
    tracks: BTreeMap<TrackId, Track>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the curve for `id`. An unsupported control point list leaves
    /// the registry unchanged.
    pub fn upsert(
        &mut self,
        id: TrackId,
        control_points: Vec<f64>,
        color: Color,
        stroke_width: f64,
    ) -> Result<&Track, CurveError> {
        let track = Track::new(id, control_points, color, stroke_width)?;
        Ok(self.insert(track))
    }

    pub(crate) fn insert(&mut self, track: Track) -> &Track {
        let id = track.id;
        self.tracks.insert(id, track);
        &self.tracks[&id]
    }

    /// Swaps in a complete track list
    pub(crate) fn replace_all(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks.into_iter().map(|track| (track.id, track)).collect();
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        self.tracks.remove(&id)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }
}
