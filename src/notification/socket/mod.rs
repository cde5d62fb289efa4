//! Socket Channel.
//!
//! A Socket.IO v4 client over a WebSocket the renderer opens. The protocol
//! logic lives in [`SocketSession`]; [`SocketConnection::run`] drives it over
//! any text stream/sink pair so the same code runs against the browser
//! WebSocket and against in-memory channels in tests.
//!
//! A connection is single-use. When it ends its [`SocketHandle`] reports
//! `Disconnected`, and [`NotificationHub::keep_socket_open`] opens a fresh
//! one with a new token after a short pause.
//!
//! [`NotificationHub::keep_socket_open`]: crate::notification::NotificationHub::keep_socket_open

pub mod frame;

use std::sync::{Arc, Mutex};

use dioxus_logger::tracing;
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::watch;

use crate::{
    error::SocketError,
    model::order::{OrderDto, OrderStatus},
};

use frame::{Frame, Packet};

/// Event emitted by the server whenever an order changes.
pub const ORDER_UPDATED_EVENT: &str = "orderUpdated";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketState {
    Disconnected,
    Connecting,
    Connected,
}

/// What the driver must do after a frame was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Send(String),
    /// An `orderUpdated` event for an order that is now `PAID`.
    PaidOrder(OrderDto),
    Closed,
}

/// Socket.IO protocol state of one connection.
#[derive(Debug, Clone)]
pub struct SocketSession {
    token: String,
    state: SocketState,
}

impl SocketSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            state: SocketState::Connecting,
        }
    }

    pub fn state(&self) -> SocketState {
        self.state
    }

    /// Handles one incoming text frame.
    ///
    /// # Returns
    /// - `Ok(Vec<SessionAction>)` - Frames to send and events to deliver, in order
    /// - `Err(SocketError::ConnectRejected)` - The server refused the credential
    /// - `Err(SocketError::MalformedFrame)` - The frame could not be decoded
    pub fn on_frame(&mut self, text: &str) -> Result<Vec<SessionAction>, SocketError> {
        let actions = match frame::decode(text)? {
            Frame::Open(open) => {
                tracing::debug!("Engine.IO session {} opened", open.sid);
                vec![SessionAction::Send(frame::connect_frame(&self.token))]
            }
            Frame::Ping => vec![SessionAction::Send(frame::encode(&Frame::Pong))],
            Frame::Pong | Frame::Noop => Vec::new(),
            Frame::Close => {
                self.state = SocketState::Disconnected;
                vec![SessionAction::Closed]
            }
            Frame::Message(Packet::Connect(_)) => {
                self.state = SocketState::Connected;
                tracing::info!("Order socket connected");
                Vec::new()
            }
            Frame::Message(Packet::Disconnect) => {
                self.state = SocketState::Disconnected;
                vec![SessionAction::Closed]
            }
            Frame::Message(Packet::ConnectError(message)) => {
                self.state = SocketState::Disconnected;
                return Err(SocketError::ConnectRejected(message));
            }
            Frame::Message(Packet::Event { name, args }) => self.on_event(&name, args),
        };

        Ok(actions)
    }

    fn on_event(&self, name: &str, args: Vec<serde_json::Value>) -> Vec<SessionAction> {
        if name != ORDER_UPDATED_EVENT {
            tracing::debug!("Ignoring socket event {}", name);
            return Vec::new();
        }
        let Some(payload) = args.into_iter().next() else {
            tracing::warn!("{} event without a payload", ORDER_UPDATED_EVENT);
            return Vec::new();
        };

        match serde_json::from_value::<OrderDto>(payload) {
            Ok(order) if order.status == OrderStatus::Paid => {
                vec![SessionAction::PaidOrder(order)]
            }
            Ok(order) => {
                tracing::debug!("Order #{} updated to {}", order.id, order.status);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Undecodable {} payload: {}", ORDER_UPDATED_EVENT, e);
                Vec::new()
            }
        }
    }
}

/// The hub's view of a live connection.
#[derive(Debug)]
pub struct SocketHandle {
    id: u64,
    state: Arc<Mutex<SocketState>>,
    shutdown: watch::Sender<bool>,
}

impl SocketHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> SocketState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether the connection is still open or opening.
    pub fn is_live(&self) -> bool {
        self.state() != SocketState::Disconnected
    }

    /// Asks the driver to send a close frame and stop.
    pub fn close(&self) {
        let _ = self.shutdown.send(true);
    }
}

/// A connection the renderer must open and drive.
#[derive(Debug)]
pub struct SocketConnection {
    id: u64,
    url: String,
    session: SocketSession,
    state: Arc<Mutex<SocketState>>,
    observer: Option<Arc<watch::Sender<SocketState>>>,
    shutdown: watch::Receiver<bool>,
}

impl SocketConnection {
    /// Creates a connection to `url` and the handle observing it.
    pub fn new(id: u64, url: impl Into<String>, token: impl Into<String>) -> (SocketHandle, Self) {
        let state = Arc::new(Mutex::new(SocketState::Connecting));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = SocketHandle {
            id,
            state: state.clone(),
            shutdown: shutdown_tx,
        };
        let connection = Self {
            id,
            url: url.into(),
            session: SocketSession::new(token),
            state,
            observer: None,
            shutdown: shutdown_rx,
        };

        (handle, connection)
    }

    /// Also publishes every state change to `observer`, starting now.
    pub fn observed_by(mut self, observer: Arc<watch::Sender<SocketState>>) -> Self {
        observer.send_replace(self.current_state());
        self.observer = Some(observer);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// WebSocket URL to open.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn current_state(&self) -> SocketState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, state: SocketState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
        if let Some(observer) = &self.observer {
            observer.send_if_modified(|current| {
                let changed = *current != state;
                *current = state;
                changed
            });
        }
    }

    /// Drives the session until the server closes, the transport fails or
    /// the handle asks for shutdown.
    ///
    /// # Arguments
    /// - `incoming` - Text frames received from the WebSocket
    /// - `outgoing` - Sink for text frames to send
    /// - `on_paid` - Called for every paid-order event, in arrival order
    ///
    /// # Returns
    /// - `Ok(())` - Closed by either side
    /// - `Err(SocketError)` - Connect rejected or transport failure
    pub async fn run<S, K, F>(
        mut self,
        mut incoming: S,
        mut outgoing: K,
        mut on_paid: F,
    ) -> Result<(), SocketError>
    where
        S: Stream<Item = Result<String, SocketError>> + Unpin,
        K: Sink<String, Error = SocketError> + Unpin,
        F: FnMut(OrderDto),
    {
        self.set_state(SocketState::Connecting);

        let result = 'session: loop {
            if *self.shutdown.borrow() {
                let _ = outgoing.send(frame::encode(&Frame::Close)).await;
                break Ok(());
            }

            tokio::select! {
                biased;

                changed = self.shutdown.changed() => {
                    if changed.is_err() {
                        break Ok(());
                    }
                }
                next = incoming.next() => {
                    let text = match next {
                        Some(Ok(text)) => text,
                        Some(Err(e)) => break Err(e),
                        None => break Ok(()),
                    };

                    let actions = match self.session.on_frame(&text) {
                        Ok(actions) => actions,
                        Err(SocketError::MalformedFrame { frame: raw, reason }) => {
                            tracing::warn!("Skipping socket frame {:?}: {}", raw, reason);
                            continue;
                        }
                        Err(e) => break Err(e),
                    };
                    self.set_state(self.session.state());

                    let mut closed = false;
                    for action in actions {
                        match action {
                            SessionAction::Send(reply) => {
                                if let Err(e) = outgoing.send(reply).await {
                                    break 'session Err(e);
                                }
                            }
                            SessionAction::PaidOrder(order) => on_paid(order),
                            SessionAction::Closed => closed = true,
                        }
                    }
                    if closed {
                        break Ok(());
                    }
                }
            }
        };

        self.set_state(SocketState::Disconnected);
        let _ = outgoing.close().await;

        match &result {
            Ok(()) => tracing::info!("Order socket closed"),
            Err(e) => tracing::warn!("Order socket ended: {}", e),
        }
        result
    }
}

impl Drop for SocketConnection {
    /// A driver dropped mid-session leaves its handle reusable.
    fn drop(&mut self) {
        self.set_state(SocketState::Disconnected);
    }
}
