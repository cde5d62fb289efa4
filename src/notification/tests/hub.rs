use std::sync::atomic::{AtomicU64, Ordering};

use futures::{channel::mpsc, future, stream, SinkExt, StreamExt};
use mockito::Matcher;
use serde_json::json;

use crate::{
    error::SocketError,
    model::order::OrderDto,
    query::{KeyPattern, QueryKey},
    service::order::OrderQuery,
};

use super::*;

fn orders_key() -> QueryKey {
    OrderQuery::new(10).cache_key()
}

/// Expect a denied permission to skip registration, ignore messages and show the warning
#[tokio::test]
async fn push_denied() -> Result<(), TestError> {
    let test = TestBuilder::new().with_subscribe_endpoint(0).build().await?;
    let mut t = test_hub(&test.api_url(), 0);
    t.cache.write(orders_key(), 1u8);

    assert!(t.hub.begin_permission_request());
    t.hub.permission_resolved(Permission::Denied);

    assert!(!t.hub.register_push_token("fcm-token").await);
    assert!(!t.hub.on_push_message(&push_message(42)));
    assert!(t.hub.needs_permission_warning());
    assert!(t.drain().is_empty());
    assert!(!t.cache.read::<u8>(&orders_key()).unwrap().stale);
    test.assert_mocks();

    Ok(())
}

/// Expect the token to be registered exactly once per page load
#[tokio::test]
async fn push_registers_once() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("POST", "/api/notifications/subscribe")
                .match_body(Matcher::Json(json!({"token": "fcm-token", "topic": "new_orders"})))
                .with_status(200)
                .with_body("{}")
                .expect(1)
                .create()
        })
        .build()
        .await?;
    let t = test_hub(&test.api_url(), 0);

    t.hub.permission_resolved(Permission::Granted);

    assert!(t.hub.register_push_token("fcm-token").await);
    assert!(!t.hub.register_push_token("fcm-token").await);
    assert!(!t.hub.needs_permission_warning());
    test.assert_mocks();

    Ok(())
}

/// Expect a failed registration not to be retried
#[tokio::test]
async fn push_registration_failure_not_retried() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("POST", "/api/notifications/subscribe")
                .with_status(500)
                .expect(1)
                .create()
        })
        .build()
        .await?;
    let t = test_hub(&test.api_url(), 0);
    t.hub.permission_resolved(Permission::Granted);

    assert!(!t.hub.register_push_token("fcm-token").await);
    assert!(!t.hub.register_push_token("fcm-token").await);
    test.assert_mocks();

    Ok(())
}

/// Expect a push message to invalidate orders, play the sound and notify the desktop
#[test]
fn push_message_alerts_desktop() {
    let mut t = offline_hub(0);
    t.cache.write(orders_key(), 1u8);
    t.hub.permission_resolved(Permission::Granted);

    assert!(t.hub.on_push_message(&push_message(42)));

    assert!(t.cache.read::<u8>(&orders_key()).unwrap().stale);
    assert_eq!(
        t.drain(),
        vec![
            Alert::Sound("/notification.mp3".to_string()),
            Alert::Desktop {
                title: "New order".to_string(),
                body: "Order #42 was paid".to_string(),
            },
        ]
    );
}

/// Expect a push message on an orders page to raise the in-page banner instead
#[test]
fn push_message_on_orders_page_sets_banner() {
    let mut t = offline_hub(0);
    t.hub.permission_resolved(Permission::Granted);
    t.hub.set_viewing_orders(true);

    t.hub.on_push_message(&push_message(42));

    let alerts = t.drain();
    assert_eq!(alerts.len(), 2);
    assert!(matches!(&alerts[1], Alert::Banner(event) if event.order_id == Some(42)));
}

/// Expect the hub to keep viewing orders while moving between two orders pages
#[test]
fn viewing_orders_across_pages() {
    let t = offline_hub(0);

    t.hub.set_viewing_orders(true);
    t.hub.set_viewing_orders(true);
    t.hub.set_viewing_orders(false);
    assert!(t.hub.is_viewing_orders());

    t.hub.set_viewing_orders(false);
    t.hub.set_viewing_orders(false);
    assert!(!t.hub.is_viewing_orders());

    t.hub.set_viewing_orders(true);
    assert!(t.hub.is_viewing_orders());
}

/// Expect a paid order from the socket to invalidate orders, play the sound, toast and notify
#[test]
fn socket_paid_order_alerts() {
    let mut t = offline_hub(0);
    let mut events = t.cache.subscribe();
    let order: OrderDto = serde_json::from_value(paid_order_json(42)).unwrap();

    assert!(t.hub.on_paid_order(&order));

    assert_eq!(
        events.try_recv().unwrap(),
        crate::query::CacheEvent::Invalidated(KeyPattern::namespace("orders"))
    );
    let alerts = t.drain();
    assert_eq!(alerts.len(), 3);
    assert!(matches!(&alerts[1], Alert::Toast { title, .. } if title == "New Paid Order!"));
    assert!(matches!(&alerts[2], Alert::Desktop { body, .. } if body.contains("#42")));
}

/// Expect two alerts for one order when deduplication is off
#[test]
fn double_alert_without_dedup() {
    let mut t = offline_hub(0);
    t.hub.permission_resolved(Permission::Granted);
    let order: OrderDto = serde_json::from_value(paid_order_json(42)).unwrap();

    assert!(t.hub.on_paid_order(&order));
    assert!(t.hub.on_push_message(&push_message(42)));

    let sounds = t
        .drain()
        .into_iter()
        .filter(|a| matches!(a, Alert::Sound(_)))
        .count();
    assert_eq!(sounds, 2);
}

/// Expect the second channel's delivery to be suppressed when deduplication is on
#[test]
fn single_alert_with_dedup() {
    let mut t = offline_hub(60);
    t.hub.permission_resolved(Permission::Granted);
    let order: OrderDto = serde_json::from_value(paid_order_json(42)).unwrap();
    t.cache.write(orders_key(), 1u8);

    assert!(t.hub.on_paid_order(&order));
    t.cache.write(orders_key(), 2u8);
    assert!(!t.hub.on_push_message(&push_message(42)));

    let sounds = t
        .drain()
        .into_iter()
        .filter(|a| matches!(a, Alert::Sound(_)))
        .count();
    assert_eq!(sounds, 1);
    assert!(t.cache.read::<u8>(&orders_key()).unwrap().stale);
}

/// Expect one live socket at a time, and a fresh one after it ends
#[tokio::test]
async fn socket_recreated_after_disconnect() {
    let mut t = offline_hub(0);

    let connection = t.hub.ensure_socket("abc").unwrap();
    assert_eq!(
        connection.url(),
        "ws://127.0.0.1:9/socket.io/?EIO=4&transport=websocket"
    );
    assert!(t.hub.ensure_socket("abc").is_none());
    assert_eq!(t.hub.socket_state(), SocketState::Connecting);

    let incoming = stream::iter(
        vec![
            r#"0{"sid":"s1","pingInterval":25000,"pingTimeout":20000}"#.to_string(),
            r#"40{"sid":"n1"}"#.to_string(),
            format!("42{}", json!(["orderUpdated", paid_order_json(42)])),
        ]
        .into_iter()
        .map(Ok),
    );
    let (sent_tx, _sent_rx) = mpsc::unbounded::<String>();
    let outgoing = sent_tx.sink_map_err(|e| SocketError::Transport(e.to_string()));

    t.hub.drive_socket(connection, incoming, outgoing).await.unwrap();

    assert!(t.drain().iter().any(|a| matches!(a, Alert::Toast { .. })));
    assert_eq!(t.hub.socket_state(), SocketState::Disconnected);
    assert!(t.hub.ensure_socket("abc").is_some());
}

/// Expect a new connection with a fresh token after each disconnect, until shutdown
#[tokio::test]
async fn socket_reconnects_until_shutdown() {
    let t = offline_hub(0);
    let mut states = t.hub.watch_socket_state();
    let issued = AtomicU64::new(0);
    let opened = std::sync::Mutex::new(Vec::new());
    let (sent_tx, sent_rx) = mpsc::unbounded::<String>();

    t.hub
        .keep_socket_open(
            || {
                let n = issued.fetch_add(1, Ordering::SeqCst) + 1;
                future::ready(Some(format!("token-{n}")))
            },
            |connection| {
                let hub = t.hub.clone();
                opened
                    .lock()
                    .unwrap()
                    .push((connection.id(), hub.socket_state()));
                let outgoing = sent_tx
                    .clone()
                    .sink_map_err(|e| SocketError::Transport(e.to_string()));
                async move {
                    if connection.id() == 2 {
                        hub.shutdown();
                    }
                    let incoming = stream::iter(vec![Ok(
                        r#"0{"sid":"s1","pingInterval":25000,"pingTimeout":20000}"#.to_string(),
                    )]);
                    hub.drive_socket(connection, incoming, outgoing).await
                }
            },
            || future::ready(()),
        )
        .await;
    drop(sent_tx);

    assert_eq!(issued.load(Ordering::SeqCst), 2);
    assert_eq!(
        opened.into_inner().unwrap(),
        vec![(1, SocketState::Connecting), (2, SocketState::Connecting)]
    );
    let sent: Vec<String> = sent_rx.collect().await;
    assert_eq!(sent, vec![r#"40{"token":"token-1"}"#.to_string(), "1".to_string()]);
    assert_eq!(*states.borrow_and_update(), SocketState::Disconnected);
    assert!(t.hub.ensure_socket("token-3").is_none());
}

/// Expect a connection that fails to open to be released and retried
#[tokio::test]
async fn reconnects_after_open_failure() {
    let t = offline_hub(0);
    let attempts = AtomicU64::new(0);

    t.hub
        .keep_socket_open(
            || future::ready(Some("abc".to_string())),
            |connection| {
                let hub = t.hub.clone();
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if attempt == 2 {
                        hub.shutdown();
                    }
                    let failed = stream::iter([Err(SocketError::Transport("refused".to_string()))]);
                    let discard = futures::sink::drain().sink_map_err(|never| match never {});
                    hub.drive_socket(connection, failed, discard).await
                }
            },
            || future::ready(()),
        )
        .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(t.hub.socket_state(), SocketState::Disconnected);
}

/// Expect a second reconnect loop on the same hub to return at once
#[tokio::test]
async fn single_reconnect_loop() {
    let t = offline_hub(0);
    let (server_tx, server_rx) = mpsc::unbounded::<Result<String, SocketError>>();
    let (sent_tx, _sent_rx) = mpsc::unbounded::<String>();
    let mut server_rx = Some(server_rx);
    let mut second_attempts = 0;

    let first = t.hub.keep_socket_open(
        || future::ready(Some("abc".to_string())),
        |connection| {
            let hub = t.hub.clone();
            let incoming = server_rx.take().unwrap_or_else(|| mpsc::unbounded().1);
            let outgoing = sent_tx
                .clone()
                .sink_map_err(|e| SocketError::Transport(e.to_string()));
            async move { hub.drive_socket(connection, incoming, outgoing).await }
        },
        || future::ready(()),
    );
    futures::pin_mut!(first);
    assert!(futures::poll!(first.as_mut()).is_pending());

    t.hub
        .keep_socket_open(
            || {
                second_attempts += 1;
                future::ready(Some("abc".to_string()))
            },
            |_| future::ready(Ok(())),
            || future::ready(()),
        )
        .await;
    assert_eq!(second_attempts, 0);

    t.hub.shutdown();
    first.await;
    drop(server_tx);
}

/// Expect every socket state change to be published to watchers
#[tokio::test]
async fn socket_state_is_published() {
    let t = offline_hub(0);
    let mut states = t.hub.watch_socket_state();
    assert_eq!(*states.borrow_and_update(), SocketState::Disconnected);

    let connection = t.hub.ensure_socket("abc").unwrap();
    assert!(states.has_changed().unwrap());
    assert_eq!(*states.borrow_and_update(), SocketState::Connecting);

    let (server_tx, server_rx) = mpsc::unbounded::<Result<String, SocketError>>();
    let (sent_tx, _sent_rx) = mpsc::unbounded::<String>();
    let outgoing = sent_tx.sink_map_err(|e| SocketError::Transport(e.to_string()));
    server_tx
        .unbounded_send(Ok(
            r#"0{"sid":"s1","pingInterval":25000,"pingTimeout":20000}"#.to_string(),
        ))
        .unwrap();
    server_tx
        .unbounded_send(Ok(r#"40{"sid":"n1"}"#.to_string()))
        .unwrap();

    let watcher = async {
        states
            .wait_for(|state| *state == SocketState::Connected)
            .await
            .map(|_| ())
            .unwrap();
        drop(server_tx);
    };
    let (result, ()) = tokio::join!(t.hub.drive_socket(connection, server_rx, outgoing), watcher);

    assert!(result.is_ok());
    assert_eq!(*states.borrow(), SocketState::Disconnected);
}

/// Expect shutdown to close the socket and silence both channels
#[test]
fn shutdown_silences_channels() {
    let mut t = offline_hub(0);
    t.hub.permission_resolved(Permission::Granted);
    let _connection = t.hub.ensure_socket("abc").unwrap();
    let order: OrderDto = serde_json::from_value(paid_order_json(42)).unwrap();

    t.hub.shutdown();

    assert!(t.hub.is_shut_down());
    assert_eq!(t.hub.socket_state(), SocketState::Disconnected);
    assert!(t.hub.ensure_socket("abc").is_none());
    assert_eq!(*t.hub.watch_socket_state().borrow(), SocketState::Disconnected);
    assert!(!t.hub.on_paid_order(&order));
    assert!(!t.hub.on_push_message(&push_message(42)));
    assert!(t.drain().is_empty());
}
