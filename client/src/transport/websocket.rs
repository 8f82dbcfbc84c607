use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::transport::{
    ChannelEvent, MessageReceiver as TransportReceiver, MessageSender as TransportSender,
    RecvError, SendError, Socket as TransportSocket,
};

type EventQueue = Arc<Mutex<VecDeque<ChannelEvent>>>;

#[derive(Clone, Debug)]
pub struct WebSocketConfig {
    /// Full endpoint, e.g. `ws://localhost:8080/ws`
    pub url: String,
}

impl WebSocketConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

// Socket
pub struct Socket {
    config: WebSocketConfig,
}

impl Socket {
    pub fn new(config: WebSocketConfig) -> Self {
        Self { config }
    }
}

impl From<Socket> for Box<dyn TransportSocket> {
    fn from(socket: Socket) -> Self {
        Box::new(socket)
    }
}

impl TransportSocket for Socket {
    fn connect(&mut self) -> (Box<dyn TransportSender>, Box<dyn TransportReceiver>) {
        let events: EventQueue = Arc::new(Mutex::new(VecDeque::new()));
        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();

        spawn_connection_task(self.config.url.clone(), events.clone(), outgoing_rx);

        (
            Box::new(MessageSender { outgoing_tx }),
            Box::new(MessageReceiver { events }),
        )
    }
}

fn push_event(events: &EventQueue, event: ChannelEvent) {
    if let Ok(mut queue) = events.lock() {
        queue.push_back(event);
    }
}

fn spawn_connection_task(
    url: String,
    events: EventQueue,
    mut outgoing_rx: mpsc::UnboundedReceiver<String>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Failed to create tokio runtime: {}", e);
                push_event(&events, ChannelEvent::Closed);
                return;
            }
        };

        runtime.block_on(async {
            let stream = match connect_async(url.as_str()).await {
                Ok((stream, _response)) => stream,
                Err(e) => {
                    log::warn!("WebSocket connection to {} failed: {}", url, e);
                    push_event(&events, ChannelEvent::Closed);
                    return;
                }
            };
            push_event(&events, ChannelEvent::Opened);

            let (mut write, mut read) = stream.split();
            loop {
                tokio::select! {
                    incoming = read.next() => match incoming {
                        Some(Ok(Message::Text(text))) => {
                            push_event(&events, ChannelEvent::Message(text));
                        }
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            log::warn!("WebSocket error on {}: {}", url, e);
                            break;
                        }
                    },
                    outgoing = outgoing_rx.recv() => match outgoing {
                        Some(text) => {
                            if let Err(e) = write.send(Message::Text(text)).await {
                                log::warn!("WebSocket send on {} failed: {}", url, e);
                                break;
                            }
                        }
                        // the sender half was dropped, the client moved on
                        None => {
                            let _ = write.close().await;
                            return;
                        }
                    },
                }
            }
            push_event(&events, ChannelEvent::Closed);
        });
    });
}

// Message Sender
struct MessageSender {
    outgoing_tx: mpsc::UnboundedSender<String>,
}

impl TransportSender for MessageSender {
    fn send(&self, message: &str) -> Result<(), SendError> {
        self.outgoing_tx
            .send(message.to_string())
            .map_err(|_| SendError)
    }
}

// Message Receiver
struct MessageReceiver {
    events: EventQueue,
}

impl TransportReceiver for MessageReceiver {
    fn receive(&mut self) -> Result<Option<ChannelEvent>, RecvError> {
        let mut queue = self.events.lock().map_err(|_| RecvError)?;
        Ok(queue.pop_front())
    }
}
