//! Browser transport for the order socket.

use futures::{future, stream, SinkExt, StreamExt};
use reqwasm::websocket::{futures::WebSocket, Message};

use crate::{
    error::SocketError,
    notification::{NotificationHub, SocketConnection},
};

/// Opens a WebSocket for `connection` and drives it until it closes.
///
/// A WebSocket that cannot be opened still goes through the hub, so the
/// connection is released and the failure is reported to the caller.
pub async fn run_order_socket(
    hub: NotificationHub,
    connection: SocketConnection,
) -> Result<(), SocketError> {
    let socket = match WebSocket::open(connection.url()) {
        Ok(socket) => socket,
        Err(e) => {
            let failed = stream::iter([Err(SocketError::Transport(e.to_string()))]);
            let discard = futures::sink::drain().sink_map_err(|never| match never {});
            return hub.drive_socket(connection, failed, discard).await;
        }
    };

    let (write, read) = socket.split();

    let incoming = Box::pin(read.filter_map(|message| {
        future::ready(match message {
            Ok(Message::Text(text)) => Some(Ok(text)),
            Ok(Message::Bytes(_)) => None,
            Err(e) => Some(Err(SocketError::Transport(e.to_string()))),
        })
    }));
    let outgoing = Box::pin(
        write
            .sink_map_err(|e| SocketError::Transport(e.to_string()))
            .with(|text: String| future::ready(Ok::<_, SocketError>(Message::Text(text)))),
    );

    hub.drive_socket(connection, incoming, outgoing).await
}
