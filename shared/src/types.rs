pub type TrainId = u32;
pub type TrackId = u32;
pub type NodeId = u32;
pub type EffectSerial = u64;
pub type Color = String;

/// Milliseconds on the host's frame clock (the timestamp a vsync callback
/// receives). Only differences between two values are meaningful.
pub type WallClock = f64;
