cfg_if! {
    if #[cfg(feature = "transport_websocket")] {
        pub mod websocket;
    } else {}
}

pub use inner::{ChannelEvent, MessageReceiver, MessageSender, RecvError, SendError, Socket};

mod inner {

    /// What a polled channel reports
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ChannelEvent {
        Opened,
        Message(String),
        Closed,
    }

    #[derive(Debug)]
    pub struct SendError;

    #[derive(Debug)]
    pub struct RecvError;

    pub trait Socket {
        /// Starts a new connection attempt. Progress is reported through the
        /// receiver as [`ChannelEvent`]s.
        fn connect(&mut self) -> (Box<dyn MessageSender>, Box<dyn MessageReceiver>);
    }

    pub trait MessageSender: Send + Sync {
        /// Queues a text frame on the channel
        fn send(&self, message: &str) -> Result<(), SendError>;
    }

    pub trait MessageReceiver: Send {
        /// Returns the next pending event without blocking
        fn receive(&mut self) -> Result<Option<ChannelEvent>, RecvError>;
    }
}
