use log::debug;

use crate::{
    error::{ChannelKind, ClientError},
    transport::{ChannelEvent, MessageReceiver, MessageSender, Socket},
};

/// What the client needs to act on after polling a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Opened(ChannelKind),
    Data(String),
    Control(String),
    Lost(ChannelKind),
}

pub struct Channel {
    kind: ChannelKind,
    sender: Box<dyn MessageSender>,
    receiver: Box<dyn MessageReceiver>,
    open: bool,
}

impl Channel {
    fn connect(kind: ChannelKind, socket: &mut dyn Socket) -> Self {
        let (sender, receiver) = socket.connect();
        Self {
            kind,
            sender,
            receiver,
            open: false,
        }
    }

    /// Fails instead of queueing while the channel is not open
    pub fn send(&self, message: &str) -> Result<(), ClientError> {
        let lost = ClientError::ConnectionLoss { channel: self.kind };
        if !self.open {
            return Err(lost);
        }
        self.sender.send(message).map_err(|_| lost)
    }

    /// Drains everything pending. Stops at the first close.
    fn receive(&mut self, events: &mut Vec<ConnectionEvent>) -> bool {
        loop {
            match self.receiver.receive() {
                Ok(Some(ChannelEvent::Opened)) => {
                    self.open = true;
                    events.push(ConnectionEvent::Opened(self.kind));
                }
                Ok(Some(ChannelEvent::Message(text))) => events.push(match self.kind {
                    ChannelKind::Data => ConnectionEvent::Data(text),
                    ChannelKind::Control => ConnectionEvent::Control(text),
                }),
                Ok(None) => return true,
                Ok(Some(ChannelEvent::Closed)) | Err(_) => {
                    debug!("{} channel closed", self.kind);
                    self.open = false;
                    events.push(ConnectionEvent::Lost(self.kind));
                    return false;
                }
            }
        }
    }
}

/// One attempt at the data channel plus the control channel. Either one
/// closing ends the whole connection.
pub struct Connection {
    pub data: Channel,
    pub control: Channel,
}

impl Connection {
    pub fn connect(data_socket: &mut dyn Socket, ctrl_socket: &mut dyn Socket) -> Self {
        Self {
            data: Channel::connect(ChannelKind::Data, data_socket),
            control: Channel::connect(ChannelKind::Control, ctrl_socket),
        }
    }

    pub fn channel(&self, kind: ChannelKind) -> &Channel {
        match kind {
            ChannelKind::Data => &self.data,
            ChannelKind::Control => &self.control,
        }
    }

    /// Everything both channels have delivered since the last call, data
    /// channel first. Ends with a [`ConnectionEvent::Lost`] if a channel
    /// closed.
    pub fn receive(&mut self) -> Vec<ConnectionEvent> {
        let mut events = Vec::new();
        if self.data.receive(&mut events) {
            self.control.receive(&mut events);
        }
        events
    }
}
