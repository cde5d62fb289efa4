//! Owner of both notification channels.
//!
//! One hub is created when the application starts and handed to every page
//! through the renderer's context. Both channels end in
//! [`NotificationHub::deliver`], which invalidates the orders cache through
//! the same entry point mutations use, then alerts the operator.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use chrono::Utc;
use dioxus_logger::tracing;
use futures::{Sink, Stream};
use tokio::sync::watch;

use crate::{
    config::Config,
    data::{client::ApiClient, notification::NotificationRepository},
    error::SocketError,
    model::{
        notification::{ChannelKind, NotificationEvent, PushMessageDto},
        order::OrderDto,
    },
    notification::{
        alert::{Alert, AlertSink},
        dedup::NotificationDeduper,
        push::{Permission, PushChannel, PushState},
        socket::{frame, SocketConnection, SocketHandle, SocketState},
    },
    query::{KeyPattern, QueryCache},
    service::order::query::ORDERS_NAMESPACE,
};

struct HubInner {
    client: ApiClient,
    cache: QueryCache,
    sink: Arc<dyn AlertSink>,
    dedup: NotificationDeduper,
    socket_url: String,
    notification_sound: String,
    push: Mutex<PushChannel>,
    socket: Mutex<Option<SocketHandle>>,
    socket_state: Arc<watch::Sender<SocketState>>,
    next_socket_id: AtomicU64,
    keeping_socket: AtomicBool,
    /// Orders pages currently mounted.
    viewing_orders: AtomicUsize,
    shut_down: AtomicBool,
}

/// Coordinates the Push and Socket channels.
///
/// Cloning is cheap; clones share one set of channels.
#[derive(Clone)]
pub struct NotificationHub {
    inner: Arc<HubInner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl NotificationHub {
    /// Creates a new instance of [`NotificationHub`].
    ///
    /// # Arguments
    /// - `config` - Supplies the socket origin, sound and dedup window
    /// - `client` - Used to register the push token
    /// - `cache` - Invalidated whenever a notification arrives
    /// - `sink` - Receives toasts, desktop notifications, sounds and banners
    pub fn new(
        config: &Config,
        client: ApiClient,
        cache: QueryCache,
        sink: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            inner: Arc::new(HubInner {
                client,
                cache,
                sink,
                dedup: NotificationDeduper::new(config.dedup_window),
                socket_url: config.socket_url.clone(),
                notification_sound: config.notification_sound.clone(),
                push: Mutex::new(PushChannel::new()),
                socket: Mutex::new(None),
                socket_state: Arc::new(watch::channel(SocketState::Disconnected).0),
                next_socket_id: AtomicU64::new(1),
                keeping_socket: AtomicBool::new(false),
                viewing_orders: AtomicUsize::new(0),
                shut_down: AtomicBool::new(false),
            }),
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.shut_down.load(Ordering::SeqCst)
    }

    /// Tells the hub that an orders page mounted (`true`) or unmounted
    /// (`false`). Push alerts become an in-page banner instead of a desktop
    /// notification while any orders page is on screen.
    ///
    /// Calls are counted, so a detail page mounting before the list it
    /// replaces unmounts still leaves the hub viewing orders.
    pub fn set_viewing_orders(&self, viewing: bool) {
        let counter = &self.inner.viewing_orders;
        if viewing {
            counter.fetch_add(1, Ordering::SeqCst);
        } else {
            let _ = counter.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        }
    }

    pub fn is_viewing_orders(&self) -> bool {
        self.inner.viewing_orders.load(Ordering::SeqCst) > 0
    }

    pub fn push_state(&self) -> PushState {
        lock(&self.inner.push).state()
    }

    pub fn needs_permission_warning(&self) -> bool {
        lock(&self.inner.push).needs_permission_warning()
    }

    /// See [`PushChannel::begin_permission_request`].
    pub fn begin_permission_request(&self) -> bool {
        !self.is_shut_down() && lock(&self.inner.push).begin_permission_request()
    }

    pub fn permission_resolved(&self, permission: Permission) {
        let state = {
            let mut push = lock(&self.inner.push);
            push.permission_resolved(permission);
            push.state()
        };
        tracing::info!("Notification permission {}", state);
    }

    /// Registers the push delivery token, at most once per page load.
    ///
    /// A failed registration is logged and not retried.
    ///
    /// # Returns
    /// - `true` - The token was registered
    /// - `false` - Not granted, already attempted, or the request failed
    pub async fn register_push_token(&self, token: &str) -> bool {
        if self.is_shut_down() || !lock(&self.inner.push).claim_registration() {
            return false;
        }

        match NotificationRepository::new(&self.inner.client)
            .subscribe(token)
            .await
        {
            Ok(()) => {
                tracing::info!("Subscribed to new order notifications");
                true
            }
            Err(e) => {
                tracing::error!("Failed to subscribe to new order notifications: {}", e);
                false
            }
        }
    }

    /// Handles a foreground push message.
    ///
    /// # Returns
    /// - `true` - The message was delivered
    /// - `false` - Ignored: permission not granted, hub shut down, or a duplicate
    pub fn on_push_message(&self, message: &PushMessageDto) -> bool {
        if self.is_shut_down() {
            return false;
        }
        let event = lock(&self.inner.push).accept(message);

        match event {
            Some(event) => self.deliver(event),
            None => {
                tracing::debug!("Ignoring push message; permission not granted");
                false
            }
        }
    }

    /// Handles a paid order reported by the socket.
    pub fn on_paid_order(&self, order: &OrderDto) -> bool {
        if self.is_shut_down() {
            return false;
        }
        self.deliver(NotificationEvent::from_paid_order(order))
    }

    /// Invalidates the orders cache and alerts the operator.
    ///
    /// # Returns
    /// - `true` - The operator was alerted
    /// - `false` - Suppressed as a duplicate of a recent event
    pub fn deliver(&self, event: NotificationEvent) -> bool {
        let inner = &self.inner;
        inner.cache.invalidate(KeyPattern::namespace(ORDERS_NAMESPACE));

        if !inner.dedup.should_deliver(&event, Utc::now()) {
            tracing::debug!(
                "Suppressing duplicate notification for order {:?} from {:?}",
                event.order_id,
                event.source
            );
            return false;
        }

        tracing::info!("{}: {}", event.title, event.body);
        inner.sink.alert(Alert::Sound(inner.notification_sound.clone()));

        match event.source {
            ChannelKind::Socket => {
                inner.sink.alert(Alert::Toast {
                    title: event.title.clone(),
                    body: event.body.clone(),
                });
                inner.sink.alert(Alert::Desktop {
                    title: event.title,
                    body: event.body,
                });
            }
            ChannelKind::Push if self.is_viewing_orders() => {
                inner.sink.alert(Alert::Banner(event));
            }
            ChannelKind::Push => {
                inner.sink.alert(Alert::Desktop {
                    title: event.title,
                    body: event.body,
                });
            }
        }

        true
    }

    pub fn socket_state(&self) -> SocketState {
        lock(&self.inner.socket)
            .as_ref()
            .map(SocketHandle::state)
            .unwrap_or(SocketState::Disconnected)
    }

    /// Receiver that is notified whenever the order socket changes state,
    /// across reconnects.
    pub fn watch_socket_state(&self) -> watch::Receiver<SocketState> {
        self.inner.socket_state.subscribe()
    }

    /// Returns a new connection for the renderer to open, unless one is
    /// already live.
    ///
    /// # Arguments
    /// - `token` - Bearer credential sent in the Socket.IO connect packet
    ///
    /// # Returns
    /// - `Some(SocketConnection)` - Open a WebSocket to its URL and pass both to [`Self::drive_socket`]
    /// - `None` - A connection is live or the hub is shut down
    pub fn ensure_socket(&self, token: &str) -> Option<SocketConnection> {
        if self.is_shut_down() {
            return None;
        }

        let mut socket = lock(&self.inner.socket);
        if socket.as_ref().is_some_and(SocketHandle::is_live) {
            return None;
        }

        let id = self.inner.next_socket_id.fetch_add(1, Ordering::SeqCst);
        let (handle, connection) =
            SocketConnection::new(id, frame::endpoint(&self.inner.socket_url), token);
        let connection = connection.observed_by(self.inner.socket_state.clone());
        *socket = Some(handle);

        tracing::debug!("Opening order socket #{}", id);
        Some(connection)
    }

    /// Runs `connection` over an opened WebSocket, delivering paid orders,
    /// and drops its handle once it ends.
    pub async fn drive_socket<S, K>(
        &self,
        connection: SocketConnection,
        incoming: S,
        outgoing: K,
    ) -> Result<(), SocketError>
    where
        S: Stream<Item = Result<String, SocketError>> + Unpin,
        K: Sink<String, Error = SocketError> + Unpin,
    {
        let id = connection.id();
        let result = connection
            .run(incoming, outgoing, |order| {
                self.on_paid_order(&order);
            })
            .await;

        let mut socket = lock(&self.inner.socket);
        if socket.as_ref().is_some_and(|handle| handle.id() == id) {
            *socket = None;
        }

        result
    }

    /// Keeps an order socket open until [`Self::shutdown`].
    ///
    /// Every attempt asks for a fresh token, opens a connection through
    /// [`Self::ensure_socket`] and hands it to `open`. Once it ends, the loop
    /// waits on `pause` and tries again. Only one loop runs per hub; later
    /// calls return immediately.
    ///
    /// # Arguments
    /// - `token` - Current bearer token, or `None` when signed out
    /// - `open` - Opens a WebSocket for the connection and drives it with [`Self::drive_socket`]
    /// - `pause` - Delay between attempts
    pub async fn keep_socket_open<T, TF, O, OF, P, PF>(&self, mut token: T, mut open: O, mut pause: P)
    where
        T: FnMut() -> TF,
        TF: Future<Output = Option<String>>,
        O: FnMut(SocketConnection) -> OF,
        OF: Future<Output = Result<(), SocketError>>,
        P: FnMut() -> PF,
        PF: Future<Output = ()>,
    {
        if self.inner.keeping_socket.swap(true, Ordering::SeqCst) {
            return;
        }

        while !self.is_shut_down() {
            match token().await {
                Some(token) => {
                    if let Some(connection) = self.ensure_socket(&token) {
                        if let Err(e) = open(connection).await {
                            tracing::warn!("Order socket stopped: {}", e);
                        }
                    }
                }
                None => tracing::debug!("Signed out; order socket not opened"),
            }

            if self.is_shut_down() {
                break;
            }
            pause().await;
        }

        self.inner.keeping_socket.store(false, Ordering::SeqCst);
    }

    /// Closes the socket and stops acting on either channel.
    pub fn shutdown(&self) {
        if self.inner.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = lock(&self.inner.socket).take() {
            handle.close();
        }
        self.inner.socket_state.send_replace(SocketState::Disconnected);
        tracing::info!("Notification channels shut down");
    }
}
