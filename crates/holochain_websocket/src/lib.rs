#![deny(missing_docs)]
//! Holochain utilities for websocket serving and connecting.
//!
//! To establish an outgoing connection, use [`connect`], which will return
//! a tuple ([`WebsocketSender`], [`WebsocketReceiver`]).
//!
//! The sender multiplexes any number of concurrent [`WebsocketSender::request`]
//! calls onto the one connection: every request is tagged with a fresh
//! correlation id, and the matching response wakes exactly the caller that
//! issued it, regardless of arrival order. Messages from the remote that
//! are not responses (signals, incoming requests, the close handshake)
//! are delivered through the receiver in arrival order.
//!
//! To open a listening socket, use [`WebsocketListener::bind`] and accept
//! connections as the same (sender, receiver) pairs.
//!
//! A connection moves through `Connecting -> Open -> Closed` and `Closed`
//! is terminal: no reconnection is ever attempted here, callers decide
//! whether to dial again.
//!
//! # Example
//!
//! ```no_run
//! use holochain_serialized_bytes::prelude::*;
//! use holochain_websocket::*;
//! use futures::stream::StreamExt;
//! use std::sync::Arc;
//! use url2::prelude::*;
//!
//! #[derive(serde::Serialize, serde::Deserialize, SerializedBytes, Debug)]
//! struct TestMessage(pub String);
//!
//! # async fn doc_test() {
//! let mut server = WebsocketListener::bind(
//!     url2!("ws://127.0.0.1:0"),
//!     Arc::new(WebsocketConfig::default()),
//! )
//! .await
//! .unwrap();
//! let binding = server.local_addr().clone();
//!
//! tokio::task::spawn(async move {
//!     while let Ok((_send, mut recv)) = server.accept().await {
//!         tokio::task::spawn(async move {
//!             if let Some(WebsocketMessage::Request(msg, respond)) = recv.next().await {
//!                 let msg: TestMessage = msg.try_into().unwrap();
//!                 let msg = TestMessage(format!("echo: {}", msg.0));
//!                 respond(msg.try_into().unwrap()).await.unwrap();
//!             }
//!         });
//!     }
//! });
//!
//! let (send, _recv) = connect(binding, Arc::new(WebsocketConfig::default()))
//!     .await
//!     .unwrap();
//!
//! let rsp: TestMessage = send.request(TestMessage("test".to_string())).await.unwrap();
//! assert_eq!("echo: test", &rsp.0);
//! # }
//! ```

use std::sync::Arc;

use url2::Url2;

mod websocket_config;
pub use websocket_config::*;

#[allow(missing_docs)]
mod error;
pub use error::*;

mod websocket_listener;
pub use websocket_listener::*;

mod websocket_sender;
pub use websocket_sender::*;

mod websocket_receiver;
pub use websocket_receiver::*;

mod websocket;

mod util;
use util::{addr_to_url, url_to_addr};

/// Create a new external websocket connection.
pub async fn connect(
    url: Url2,
    config: Arc<WebsocketConfig>,
) -> WebsocketResult<(WebsocketSender, WebsocketReceiver)> {
    let addr = url_to_addr(&url).await?;
    let stream = tokio::net::TcpStream::connect(addr).await?;
    // The caller may have dialed with any scheme (the conductor docs use
    // http urls); the handshake itself always speaks ws.
    let handshake = addr_to_url(addr, config.scheme);
    let (socket, _) = tokio_tungstenite::client_async(handshake.as_str(), stream).await?;
    let remote_addr = addr_to_url(socket.get_ref().peer_addr()?, config.scheme);
    tracing::debug!(%remote_addr, "client connected");
    Ok(websocket::build_websocket_pair(config, socket, remote_addr))
}
