use serde_json::json;

use crate::{
    error::SocketError,
    notification::socket::frame::{self, Frame, OpenPayload, Packet},
};

use super::*;

/// Expect the Engine.IO handshake to decode
#[test]
fn decodes_open() {
    let decoded =
        frame::decode(r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#)
            .unwrap();

    assert_eq!(
        decoded,
        Frame::Open(OpenPayload {
            sid: "abc".to_string(),
            ping_interval: 25000,
            ping_timeout: 20000,
        })
    );
}

/// Expect control frames to decode
#[test]
fn decodes_control_frames() {
    assert_eq!(frame::decode("1").unwrap(), Frame::Close);
    assert_eq!(frame::decode("2").unwrap(), Frame::Ping);
    assert_eq!(frame::decode("3").unwrap(), Frame::Pong);
    assert_eq!(frame::decode("6").unwrap(), Frame::Noop);
    assert_eq!(frame::decode("41").unwrap(), Frame::Message(Packet::Disconnect));
}

/// Expect an event to split into its name and arguments
#[test]
fn decodes_event() {
    let decoded = frame::decode(r#"42["orderUpdated",{"id":42,"status":"PAID"}]"#).unwrap();

    assert_eq!(
        decoded,
        Frame::Message(Packet::Event {
            name: "orderUpdated".to_string(),
            args: vec![json!({"id": 42, "status": "PAID"})],
        })
    );
}

/// Expect a namespace and an acknowledgement id to be skipped
#[test]
fn skips_namespace_and_ack_id() {
    let decoded = frame::decode(r#"42/orders,7["orderUpdated",{}]"#).unwrap();

    assert!(matches!(
        decoded,
        Frame::Message(Packet::Event { ref name, .. }) if name == "orderUpdated"
    ));
}

/// Expect connect acknowledgements and connect errors to decode
#[test]
fn decodes_connect_packets() {
    assert_eq!(
        frame::decode(r#"40{"sid":"xyz"}"#).unwrap(),
        Frame::Message(Packet::Connect(Some(json!({"sid": "xyz"}))))
    );
    assert_eq!(
        frame::decode(r#"44{"message":"Unauthorized"}"#).unwrap(),
        Frame::Message(Packet::ConnectError("Unauthorized".to_string()))
    );
}

/// Expect garbage to be reported as a malformed frame
#[test]
fn rejects_malformed() {
    for text in ["", "9", "42{not json", "42[]", "42[1]", "0oops"] {
        assert!(
            matches!(frame::decode(text), Err(SocketError::MalformedFrame { .. })),
            "{:?}",
            text
        );
    }
}

/// Expect the client frames to use the v4 text encoding
#[test]
fn encodes_client_frames() {
    assert_eq!(frame::encode(&Frame::Pong), "3");
    assert_eq!(frame::connect_frame("abc"), r#"40{"token":"abc"}"#);
    assert_eq!(
        frame::encode(&Frame::Message(Packet::Event {
            name: "ping".to_string(),
            args: vec![json!(1)],
        })),
        r#"42["ping",1]"#
    );
}

/// Expect HTTP origins to become WebSocket endpoints
#[test]
fn builds_endpoint() {
    assert_eq!(
        frame::endpoint("https://api.example.com/"),
        "wss://api.example.com/socket.io/?EIO=4&transport=websocket"
    );
    assert_eq!(
        frame::endpoint("http://localhost:4000"),
        "ws://localhost:4000/socket.io/?EIO=4&transport=websocket"
    );
}
