use std::{default::Default, time::Duration};

/// How a `track` packet is merged into the track registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrackSyncPolicy {
    /// Rows are upserted by id; tracks not mentioned are kept
    #[default]
    Upsert,
    /// The packet is the complete track list; tracks not mentioned are dropped
    Replace,
}

/// Contains Config properties which will be used by the Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Fixed wait between a lost connection and the next attempt. There is no
    /// backoff and no retry cap.
    pub reconnect_delay: Duration,
    /// How far outside `[0, 1]` a train's parameter may be and still be drawn
    /// and clickable
    pub visibility_grace: f64,
    /// Merge policy for `track` packets
    pub track_sync: TrackSyncPolicy,
    /// Width and height of a train sprite, used for click hit-testing
    pub train_size: (f64, f64),
    /// Click radius of a junction node
    pub node_radius: f64,
}

impl ClientConfig {
    pub(crate) fn reconnect_delay_ms(&self) -> f64 {
        self.reconnect_delay.as_secs_f64() * 1000.0
    }

    /// Radius around a train's anchor that counts as a click on it
    pub(crate) fn train_hit_radius(&self) -> f64 {
        let (width, height) = self.train_size;
        ((width / 2.0).powi(2) + (height / 2.0).powi(2)).sqrt()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: Duration::from_millis(500),
            visibility_grace: 0.1,
            track_sync: TrackSyncPolicy::default(),
            train_size: (350.0 / 4.0, 263.0 / 4.0),
            node_radius: 40.0,
        }
    }
}
