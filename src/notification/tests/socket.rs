use blossom_test_utils::fixtures;
use futures::{channel::mpsc, stream, SinkExt, StreamExt};
use serde_json::json;

use crate::{
    error::SocketError,
    model::order::OrderDto,
    notification::socket::{SessionAction, SocketSession},
};

use super::*;

fn event_frame(order: &Value) -> String {
    format!("42{}", json!(["orderUpdated", order]))
}

/// Expect the handshake to answer with an authenticated connect packet
#[test]
fn open_sends_connect() {
    let mut session = SocketSession::new("abc");

    let actions = session.on_frame(r#"0{"sid":"s1","pingInterval":25000,"pingTimeout":20000}"#).unwrap();

    assert_eq!(actions, vec![SessionAction::Send(r#"40{"token":"abc"}"#.to_string())]);
    assert_eq!(session.state(), SocketState::Connecting);

    session.on_frame(r#"40{"sid":"n1"}"#).unwrap();
    assert_eq!(session.state(), SocketState::Connected);
}

/// Expect server pings to be answered
#[test]
fn answers_ping() {
    let mut session = SocketSession::new("abc");

    assert_eq!(
        session.on_frame("2").unwrap(),
        vec![SessionAction::Send("3".to_string())]
    );
}

/// Expect only PAID order updates to be reported
#[test]
fn reports_paid_orders_only() {
    let mut session = SocketSession::new("abc");

    let paid = session.on_frame(&event_frame(&paid_order_json(42))).unwrap();
    assert!(matches!(&paid[..], [SessionAction::PaidOrder(order)] if order.id == 42));

    let delivered = fixtures::order::order_json(43, "DELIVERED", Utc::now(), 10.0);
    assert!(session.on_frame(&event_frame(&delivered)).unwrap().is_empty());

    let other = format!("42{}", json!(["somethingElse", {}]));
    assert!(session.on_frame(&other).unwrap().is_empty());

    let garbage = format!("42{}", json!(["orderUpdated", {"id": "x"}]));
    assert!(session.on_frame(&garbage).unwrap().is_empty());
}

/// Expect a refused connect to surface the server's reason
#[test]
fn connect_error() {
    let mut session = SocketSession::new("bad");

    let result = session.on_frame(r#"44{"message":"Invalid token"}"#);

    assert_eq!(
        result,
        Err(SocketError::ConnectRejected("Invalid token".to_string()))
    );
    assert_eq!(session.state(), SocketState::Disconnected);
}

/// Expect the driver to reply to the server and deliver paid orders in order
#[tokio::test]
async fn drives_session() {
    let incoming = stream::iter(
        vec![
            r#"0{"sid":"s1","pingInterval":25000,"pingTimeout":20000}"#.to_string(),
            r#"40{"sid":"n1"}"#.to_string(),
            "2".to_string(),
            "not a frame".to_string(),
            event_frame(&paid_order_json(42)),
            event_frame(&paid_order_json(43)),
            "41".to_string(),
        ]
        .into_iter()
        .map(Ok),
    );
    let (sent_tx, sent_rx) = mpsc::unbounded::<String>();
    let outgoing = sent_tx.sink_map_err(|e| SocketError::Transport(e.to_string()));
    let (handle, connection) = SocketConnection::new(1, "ws://localhost", "abc");
    let mut paid: Vec<OrderDto> = Vec::new();

    let result = connection
        .run(incoming, outgoing, |order| paid.push(order))
        .await;

    assert!(result.is_ok());
    assert_eq!(paid.iter().map(|o| o.id).collect::<Vec<_>>(), vec![42, 43]);
    assert_eq!(handle.state(), SocketState::Disconnected);
    let sent: Vec<String> = sent_rx.collect().await;
    assert_eq!(sent, vec![r#"40{"token":"abc"}"#.to_string(), "3".to_string()]);
}

/// Expect closing the handle to send a close frame and end the driver
#[tokio::test]
async fn handle_close_stops_driver() {
    let (server_tx, server_rx) = mpsc::unbounded::<Result<String, SocketError>>();
    let (sent_tx, sent_rx) = mpsc::unbounded::<String>();
    let outgoing = sent_tx.sink_map_err(|e| SocketError::Transport(e.to_string()));
    let (handle, connection) = SocketConnection::new(1, "ws://localhost", "abc");

    handle.close();
    let result = connection.run(server_rx, outgoing, |_| {}).await;

    assert!(result.is_ok());
    assert!(!handle.is_live());
    let sent: Vec<String> = sent_rx.collect().await;
    assert_eq!(sent, vec!["1".to_string()]);
    drop(server_tx);
}

/// Expect a transport failure to end the driver with the error
#[tokio::test]
async fn transport_error_ends_driver() {
    let incoming = stream::iter(vec![Err(SocketError::Transport("reset".to_string()))]);
    let (sent_tx, _sent_rx) = mpsc::unbounded::<String>();
    let outgoing = sent_tx.sink_map_err(|e| SocketError::Transport(e.to_string()));
    let (handle, connection) = SocketConnection::new(1, "ws://localhost", "abc");

    let result = connection.run(incoming, outgoing, |_| {}).await;

    assert_eq!(result, Err(SocketError::Transport("reset".to_string())));
    assert_eq!(handle.state(), SocketState::Disconnected);
}

/// Expect a connection dropped before it finished to leave its handle reusable
#[test]
fn dropped_connection_is_not_live() {
    let (handle, connection) = SocketConnection::new(1, "ws://localhost", "abc");
    assert!(handle.is_live());

    drop(connection);

    assert!(!handle.is_live());
}
