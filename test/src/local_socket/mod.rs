/// In-memory socket implementation for end-to-end client tests.
/// The test plays the server through [`LocalServer`].
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use trackside_client::transport::{
    ChannelEvent, MessageReceiver, MessageSender, RecvError, SendError, Socket,
};
use trackside_shared::ServerPacket;

/// One accepted (or refused) connection attempt
struct Link {
    events: VecDeque<ChannelEvent>,
    open: bool,
}

struct ServerState {
    accepting: bool,
    connect_count: usize,
    current: Option<Arc<Mutex<Link>>>,
    sent: Vec<String>,
}

/// Client-side socket and the server handle that drives it
pub struct LocalSocketPair {
    pub socket: LocalSocket,
    pub server: LocalServer,
}

impl LocalSocketPair {
    pub fn new() -> Self {
        let state = Arc::new(Mutex::new(ServerState {
            accepting: true,
            connect_count: 0,
            current: None,
            sent: Vec::new(),
        }));
        Self {
            socket: LocalSocket {
                state: state.clone(),
            },
            server: LocalServer { state },
        }
    }
}

impl Default for LocalSocketPair {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LocalSocket {
    state: Arc<Mutex<ServerState>>,
}

impl Socket for LocalSocket {
    fn connect(&mut self) -> (Box<dyn MessageSender>, Box<dyn MessageReceiver>) {
        let mut state = self.state.lock().unwrap();
        state.connect_count += 1;

        let mut events = VecDeque::new();
        events.push_back(if state.accepting {
            ChannelEvent::Opened
        } else {
            ChannelEvent::Closed
        });
        let link = Arc::new(Mutex::new(Link {
            events,
            open: state.accepting,
        }));
        state.current = if state.accepting {
            Some(link.clone())
        } else {
            None
        };

        (
            Box::new(LocalSender {
                link: link.clone(),
                state: self.state.clone(),
            }),
            Box::new(LocalReceiver { link }),
        )
    }
}

struct LocalSender {
    link: Arc<Mutex<Link>>,
    state: Arc<Mutex<ServerState>>,
}

impl MessageSender for LocalSender {
    fn send(&self, message: &str) -> Result<(), SendError> {
        if !self.link.lock().unwrap().open {
            return Err(SendError);
        }
        self.state.lock().unwrap().sent.push(message.to_string());
        Ok(())
    }
}

struct LocalReceiver {
    link: Arc<Mutex<Link>>,
}

impl MessageReceiver for LocalReceiver {
    fn receive(&mut self) -> Result<Option<ChannelEvent>, RecvError> {
        Ok(self.link.lock().unwrap().events.pop_front())
    }
}

/// The test's end of a [`LocalSocketPair`]
pub struct LocalServer {
    state: Arc<Mutex<ServerState>>,
}

impl LocalServer {
    /// How many times the client has tried to connect
    pub fn connect_count(&self) -> usize {
        self.state.lock().unwrap().connect_count
    }

    /// Refused attempts close immediately
    pub fn set_accepting(&self, accepting: bool) {
        self.state.lock().unwrap().accepting = accepting;
    }

    pub fn is_connected(&self) -> bool {
        self.state.lock().unwrap().current.is_some()
    }

    /// Delivers raw text on the current connection. Returns false if there
    /// is none.
    pub fn push(&self, text: &str) -> bool {
        let state = self.state.lock().unwrap();
        let Some(link) = state.current.as_ref() else {
            return false;
        };
        link.lock()
            .unwrap()
            .events
            .push_back(ChannelEvent::Message(text.to_string()));
        true
    }

    pub fn push_packet(&self, packet: &ServerPacket) -> bool {
        self.push(&packet.to_string())
    }

    /// Drops the current connection from the server side
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        if let Some(link) = state.current.take() {
            let mut link = link.lock().unwrap();
            link.open = false;
            link.events.push_back(ChannelEvent::Closed);
        }
    }

    /// Everything the client sent since the last call
    pub fn take_sent(&self) -> Vec<String> {
        std::mem::take(&mut self.state.lock().unwrap().sent)
    }
}
