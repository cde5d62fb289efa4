use thiserror::Error;

/// Failures of the order socket connection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SocketError {
    /// A frame did not follow the Engine.IO / Socket.IO text encoding.
    #[error("Malformed socket frame {frame:?}: {reason}")]
    MalformedFrame { frame: String, reason: String },
    /// The server refused the Socket.IO connect packet.
    #[error("Socket connection rejected: {0}")]
    ConnectRejected(String),
    /// The underlying WebSocket failed.
    #[error("Socket transport error: {0}")]
    Transport(String),
}
