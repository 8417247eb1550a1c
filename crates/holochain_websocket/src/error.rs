use holochain_serialized_bytes::SerializedBytesError;

/// Anything that can go wrong on one websocket connection.
#[derive(Debug, thiserror::Error)]
pub enum WebsocketError {
    /// Raw network failure.
    #[error("websocket io error: {0}")]
    Io(#[from] std::io::Error),

    /// Websocket protocol failure.
    #[error("websocket protocol error: {0}")]
    Websocket(#[from] tungstenite::Error),

    /// A message failed to move between wire bytes and a typed value.
    #[error("failed to (de)serialize websocket message: {0}")]
    SerializedBytes(#[from] SerializedBytesError),

    /// The connection is closed. Every request still pending when a
    /// connection closes fails with this, exactly once per request, and
    /// any request issued afterwards fails with it immediately.
    #[error("the websocket connection is closed")]
    Closed,

    /// The configured request timeout elapsed with no response.
    #[error("the request timed out before a response arrived")]
    RequestTimeout,

    /// An incoming request could not be answered because the connection
    /// went away in the meantime.
    #[error("failed to send response, the remote requester has gone away")]
    FailedToSendResp,
}

/// Websocket result type.
pub type WebsocketResult<T> = Result<T, WebsocketError>;
