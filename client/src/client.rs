use log::{debug, info, warn};

use trackside_shared::{ClickModifier, ClientPacket, CtrlPacket, DVec2, ServerPacket, WallClock};

use crate::{
    client_config::ClientConfig,
    connection::{Connection, ConnectionEvent},
    error::{ChannelKind, ClientError},
    frame::{run_frame, Frame, ViewOrigin},
    interaction::click_packets,
    model::client_model::ClientModel,
    node_lookup::NodeLookup,
    transport::Socket,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// An attempt is in flight, the data channel has not opened yet
    Connecting,
    Connected,
    /// Waiting out the reconnect delay
    Disconnected,
}

/// Client can connect to a server and keep its model of the board in sync.
/// Nothing blocks: call [`Client::update`] once per frame.
pub struct Client {
    config: ClientConfig,
    model: ClientModel,
    data_socket: Box<dyn Socket>,
    ctrl_socket: Box<dyn Socket>,
    node_lookup: Box<dyn NodeLookup>,
    connection: Option<Connection>,
    status: ConnectionStatus,
    /// Earliest wall clock for the next attempt. Unset before the first one.
    reconnect_at: Option<WallClock>,
}

impl Client {
    /// Create a new Client. The first connection attempt is made on the
    /// first call to [`Client::receive_all_messages`].
    pub fn new(
        config: ClientConfig,
        data_socket: Box<dyn Socket>,
        ctrl_socket: Box<dyn Socket>,
        node_lookup: Box<dyn NodeLookup>,
    ) -> Self {
        let model = ClientModel::new(config.track_sync);
        Self {
            config,
            model,
            data_socket,
            ctrl_socket,
            node_lookup,
            connection: None,
            status: ConnectionStatus::Disconnected,
            reconnect_at: None,
        }
    }

    /// Polls both channels and the node lookup, applying everything that
    /// arrived. Starts a new connection attempt if one is due.
    pub fn receive_all_messages(&mut self, now: WallClock) {
        if self.connection.is_none() && self.reconnect_at.map_or(true, |at| now >= at) {
            self.connect(now);
        }

        let events = match self.connection.as_mut() {
            Some(connection) => connection.receive(),
            None => Vec::new(),
        };
        for event in events {
            match event {
                ConnectionEvent::Opened(ChannelKind::Data) => {
                    info!("Data channel open, resyncing");
                    self.model.clear();
                    self.status = ConnectionStatus::Connected;
                }
                ConnectionEvent::Opened(ChannelKind::Control) => {
                    info!("Control channel open");
                }
                ConnectionEvent::Data(text) => self.receive_data(&text, now),
                ConnectionEvent::Control(text) => {
                    debug!("Control acknowledgment: {:?}", text);
                }
                ConnectionEvent::Lost(channel) => {
                    self.disconnect(channel, now);
                    break;
                }
            }
        }

        while let Some(response) = self.node_lookup.receive() {
            self.model.merge_node_capability(response);
        }
    }

    fn connect(&mut self, now: WallClock) {
        info!("Connecting");
        self.connection = Some(Connection::connect(
            self.data_socket.as_mut(),
            self.ctrl_socket.as_mut(),
        ));
        self.status = ConnectionStatus::Connecting;
        self.reconnect_at = Some(now + self.config.reconnect_delay_ms());
    }

    fn disconnect(&mut self, channel: ChannelKind, now: WallClock) {
        info!(
            "Connection lost on the {} channel, retrying in {:?}",
            channel, self.config.reconnect_delay
        );
        self.connection = None;
        self.status = ConnectionStatus::Disconnected;
        self.reconnect_at = Some(now + self.config.reconnect_delay_ms());
    }

    fn receive_data(&mut self, text: &str, now: WallClock) {
        debug!("Received: {:?}", text);
        let result = text
            .parse::<ServerPacket>()
            .map_err(ClientError::from)
            .and_then(|packet| self.model.apply(packet, now));
        match result {
            Ok(Some(ticket)) => self.node_lookup.request(ticket),
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }

    /// Computes this frame's poses without touching the network
    pub fn frame(&mut self, now: WallClock, origin: ViewOrigin) -> Frame {
        let mut frame = run_frame(&mut self.model, &self.config, now, origin);
        frame.degraded = self.status != ConnectionStatus::Connected;
        frame
    }

    /// The per-vsync entry point: drain the network, then compute the frame
    pub fn update(&mut self, now: WallClock, origin: ViewOrigin) -> Frame {
        self.receive_all_messages(now);
        self.frame(now, origin)
    }

    /// Sends on the data channel. Nothing is queued while disconnected.
    pub fn send_data(&mut self, packet: &ClientPacket) -> Result<(), ClientError> {
        self.send(ChannelKind::Data, &packet.to_string())
    }

    /// Sends an editing command on the control channel
    pub fn send_control(&mut self, packet: &CtrlPacket) -> Result<(), ClientError> {
        self.send(ChannelKind::Control, &packet.to_string())
    }

    fn send(&mut self, channel: ChannelKind, text: &str) -> Result<(), ClientError> {
        let connection = self
            .connection
            .as_ref()
            .ok_or(ClientError::ConnectionLoss { channel })?;
        connection.channel(channel).send(text)
    }

    /// Hit-tests a click against `frame` and sends the resulting packets.
    /// Returns how many were sent.
    pub fn click(
        &mut self,
        frame: &Frame,
        screen: DVec2,
        modifier: ClickModifier,
    ) -> Result<usize, ClientError> {
        let packets = click_packets(frame, &self.config, screen, modifier);
        for packet in &packets {
            self.send_data(packet)?;
        }
        Ok(packets.len())
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn model(&self) -> &ClientModel {
        &self.model
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
