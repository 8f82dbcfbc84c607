use trackside_client::{Client, ClientConfig, Frame, ViewOrigin};
use trackside_shared::WallClock;

use crate::{
    helpers::scripted_lookup::{ScriptedLookup, ScriptedLookupHandle},
    local_socket::{LocalServer, LocalSocketPair},
};

/// A [`Client`] wired to in-memory sockets and a scripted node lookup, with
/// a wall clock the test advances by hand
pub struct TestClient {
    pub client: Client,
    pub data: LocalServer,
    pub control: LocalServer,
    pub lookup: ScriptedLookupHandle,
    pub now: WallClock,
}

impl TestClient {
    pub fn new(config: ClientConfig) -> Self {
        let data = LocalSocketPair::new();
        let control = LocalSocketPair::new();
        let (lookup, handle) = ScriptedLookup::new();

        Self {
            client: Client::new(
                config,
                Box::new(data.socket),
                Box::new(control.socket),
                Box::new(lookup),
            ),
            data: data.server,
            control: control.server,
            lookup: handle,
            now: 0.0,
        }
    }

    /// Runs one frame at the current clock
    pub fn frame(&mut self) -> Frame {
        self.client.update(self.now, ViewOrigin::default())
    }

    /// Advances the clock, then runs one frame
    pub fn advance(&mut self, ms: f64) -> Frame {
        self.now += ms;
        self.frame()
    }

    /// Pushes `text` on the data channel and runs a frame to apply it
    pub fn receive(&mut self, text: &str) -> Frame {
        assert!(self.data.push(text), "data channel is not connected");
        self.frame()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
