use std::pin::Pin;
use std::task::Context;
use std::task::Poll;

use futures::future::BoxFuture;
use holochain_serialized_bytes::prelude::*;
use url2::Url2;

use crate::WebsocketResult;

/// Callback for responding to an incoming websocket request.
/// Invoke it with the serialized response payload; the connection tags
/// the reply with the correlation id the remote chose.
pub type WebsocketRespond =
    Box<dyn FnOnce(SerializedBytes) -> BoxFuture<'static, WebsocketResult<()>> + 'static + Send>;

/// Details of a close handshake received from the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsocketClosed {
    /// Websocket close code.
    pub code: u16,

    /// Human readable close reason.
    pub reason: String,
}

/// A message received from the remote end of this websocket that is not
/// the response to one of our requests.
pub enum WebsocketMessage {
    /// An unsolicited signal.
    Signal(SerializedBytes),

    /// A request the remote expects an answer to.
    Request(SerializedBytes, WebsocketRespond),

    /// The remote closed the connection.
    Close(WebsocketClosed),
}

impl std::fmt::Debug for WebsocketMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebsocketMessage::Signal(data) => {
                f.debug_tuple("WebsocketMessage::Signal").field(data).finish()
            }
            WebsocketMessage::Request(data, _) => f
                .debug_tuple("WebsocketMessage::Request")
                .field(data)
                .finish(),
            WebsocketMessage::Close(closed) => f
                .debug_tuple("WebsocketMessage::Close")
                .field(closed)
                .finish(),
        }
    }
}

/// The receiving half of an active websocket connection: a
/// [`futures::stream::Stream`] of [`WebsocketMessage`]s, delivered in the
/// order they arrived on the wire. The stream ends when the connection
/// closes.
///
/// Responses to our own requests never show up here; they resolve the
/// matching [`WebsocketSender::request`](crate::WebsocketSender::request)
/// future directly.
pub struct WebsocketReceiver {
    remote_addr: Url2,
    rx_from_socket: tokio::sync::mpsc::Receiver<WebsocketMessage>,
}

impl WebsocketReceiver {
    pub(crate) fn priv_new(
        remote_addr: Url2,
        rx_from_socket: tokio::sync::mpsc::Receiver<WebsocketMessage>,
    ) -> Self {
        Self {
            remote_addr,
            rx_from_socket,
        }
    }

    /// The url of the remote end of this websocket.
    pub fn remote_addr(&self) -> &Url2 {
        &self.remote_addr
    }
}

impl futures::stream::Stream for WebsocketReceiver {
    type Item = WebsocketMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx_from_socket.poll_recv(cx)
    }
}
