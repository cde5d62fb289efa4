//! Engine.IO v4 / Socket.IO v4 text frames.
//!
//! Only what the order socket needs is supported: text frames on the
//! default namespace, no binary attachments.
//!
//! ```text
//! 0{"sid":"..","pingInterval":25000,"pingTimeout":20000}   open
//! 2 / 3                                                    ping / pong
//! 40{"token":".."}                                         connect
//! 42["orderUpdated",{..}]                                  event
//! 44{"message":"Unauthorized"}                             connect error
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::error::SocketError;

/// Engine.IO handshake data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPayload {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

/// A Socket.IO packet carried in an Engine.IO message.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Connect(Option<Value>),
    Disconnect,
    Event { name: String, args: Vec<Value> },
    ConnectError(String),
}

/// An Engine.IO packet.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Open(OpenPayload),
    Close,
    Ping,
    Pong,
    Message(Packet),
    Noop,
}

fn malformed(frame: &str, reason: impl Into<String>) -> SocketError {
    SocketError::MalformedFrame {
        frame: frame.chars().take(120).collect(),
        reason: reason.into(),
    }
}

/// Decodes one text frame.
pub fn decode(text: &str) -> Result<Frame, SocketError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or_else(|| malformed(text, "empty frame"))?;
    let rest = chars.as_str();

    match kind {
        '0' => serde_json::from_str(rest)
            .map(Frame::Open)
            .map_err(|e| malformed(text, e.to_string())),
        '1' => Ok(Frame::Close),
        '2' => Ok(Frame::Ping),
        '3' => Ok(Frame::Pong),
        '4' => decode_packet(text, rest).map(Frame::Message),
        '6' => Ok(Frame::Noop),
        other => Err(malformed(text, format!("unknown engine packet type {:?}", other))),
    }
}

fn decode_packet(frame: &str, text: &str) -> Result<Packet, SocketError> {
    let mut chars = text.chars();
    let kind = chars
        .next()
        .ok_or_else(|| malformed(frame, "empty socket packet"))?;
    let mut rest = chars.as_str();

    // Namespace other than "/" ("/admin,...").
    if rest.starts_with('/') {
        rest = rest.split_once(',').map(|(_, r)| r).unwrap_or("");
    }
    // Acknowledgement id.
    rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());

    let json = || -> Result<Value, SocketError> {
        serde_json::from_str(rest).map_err(|e| malformed(frame, e.to_string()))
    };

    match kind {
        '0' if rest.is_empty() => Ok(Packet::Connect(None)),
        '0' => json().map(|v| Packet::Connect(Some(v))),
        '1' => Ok(Packet::Disconnect),
        '2' => {
            let Value::Array(mut items) = json()? else {
                return Err(malformed(frame, "event payload is not an array"));
            };
            if items.is_empty() {
                return Err(malformed(frame, "event without a name"));
            }
            let Value::String(name) = items.remove(0) else {
                return Err(malformed(frame, "event name is not a string"));
            };
            Ok(Packet::Event { name, args: items })
        }
        '4' => {
            let message = match json()? {
                Value::String(message) => message,
                value => value
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string()),
            };
            Ok(Packet::ConnectError(message))
        }
        other => Err(malformed(frame, format!("unsupported socket packet type {:?}", other))),
    }
}

/// Encodes a frame sent by the client.
pub fn encode(frame: &Frame) -> String {
    match frame {
        Frame::Open(open) => format!(
            "0{}",
            serde_json::json!({
                "sid": open.sid,
                "pingInterval": open.ping_interval,
                "pingTimeout": open.ping_timeout,
            })
        ),
        Frame::Close => "1".to_string(),
        Frame::Ping => "2".to_string(),
        Frame::Pong => "3".to_string(),
        Frame::Noop => "6".to_string(),
        Frame::Message(packet) => format!("4{}", encode_packet(packet)),
    }
}

fn encode_packet(packet: &Packet) -> String {
    match packet {
        Packet::Connect(None) => "0".to_string(),
        Packet::Connect(Some(auth)) => format!("0{}", auth),
        Packet::Disconnect => "1".to_string(),
        Packet::Event { name, args } => {
            let mut items = vec![Value::String(name.clone())];
            items.extend(args.iter().cloned());
            format!("2{}", Value::Array(items))
        }
        Packet::ConnectError(message) => {
            format!("4{}", serde_json::json!({ "message": message }))
        }
    }
}

/// The Socket.IO connect packet authenticating with `token`.
pub fn connect_frame(token: &str) -> String {
    encode(&Frame::Message(Packet::Connect(Some(
        serde_json::json!({ "token": token }),
    ))))
}

/// WebSocket URL of the Socket.IO endpoint under `socket_url`.
pub fn endpoint(socket_url: &str) -> String {
    let base = socket_url.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };

    format!("{}/socket.io/?EIO=4&transport=websocket", base)
}
