//! internal connection plumbing: the wire envelope, the pending request
//! table and the two tasks that service one physical socket.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::FutureExt;
use futures::sink::SinkExt;
use futures::stream::StreamExt;
use holochain_serialized_bytes::prelude::*;
use parking_lot::Mutex;
use tungstenite::protocol::frame::coding::CloseCode;
use tungstenite::protocol::CloseFrame;

use crate::util::ToFromSocket;
use crate::WebsocketClosed;
use crate::WebsocketConfig;
use crate::WebsocketError;
use crate::WebsocketMessage;
use crate::WebsocketReceiver;
use crate::WebsocketRespond;
use crate::WebsocketResult;
use crate::WebsocketSender;
use url2::Url2;

/// The envelope around every message on the wire.
///
/// `Request` and `Response` carry the correlation id that pairs them up;
/// a `Signal` is unsolicited and correlates with nothing.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub(crate) enum WireMessage {
    Signal {
        #[serde(with = "serde_bytes")]
        data: Vec<u8>,
    },
    Request {
        id: u64,
        #[serde(with = "serde_bytes")]
        data: Vec<u8>,
    },
    Response {
        id: u64,
        #[serde(with = "serde_bytes")]
        data: Vec<u8>,
    },
}

/// What the application side hands to the socket writer task.
#[derive(Debug)]
pub(crate) enum OutgoingMessage {
    Msg(tungstenite::Message),
    Close,
}

pub(crate) type TxToSocket = tokio::sync::mpsc::Sender<OutgoingMessage>;
type RxToSocket = tokio::sync::mpsc::Receiver<OutgoingMessage>;

pub(crate) type ResponseSender = tokio::sync::oneshot::Sender<WebsocketResult<SerializedBytes>>;

/// The table of requests that have been sent and not yet answered.
///
/// This is the single synchronization point for the whole connection:
/// id assignment, registration, resolution and teardown all happen under
/// its lock, so concurrent callers can never share an id and every
/// pending request is failed at most once when the connection closes.
#[derive(Debug)]
pub(crate) struct PendingRequests {
    responses: HashMap<u64, ResponseSender>,
    index: u64,
    closed: bool,
}

pub(crate) type Pending = Arc<Mutex<PendingRequests>>;

impl PendingRequests {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
            index: 0,
            closed: false,
        }
    }

    /// Assign a fresh correlation id and register the response slot.
    /// The index only ever moves forward, so an id is never reused.
    pub(crate) fn register(&mut self, respond: ResponseSender) -> Option<u64> {
        if self.closed {
            return None;
        }
        let index = self.index;
        self.index += 1;
        self.responses.insert(index, respond);
        Some(index)
    }

    /// Retrieve the response slot at this id.
    pub(crate) fn pop(&mut self, id: u64) -> Option<ResponseSender> {
        self.responses.remove(&id)
    }

    /// Transition to closed, failing everything still outstanding.
    /// Draining the map makes this exactly-once even if both the reader
    /// task and an explicit `close()` call get here.
    pub(crate) fn close(&mut self) {
        self.closed = true;
        for (_, respond) in self.responses.drain() {
            respond.send(Err(WebsocketError::Closed)).ok();
        }
    }
}

pub(crate) fn serialize_wire_message(msg: WireMessage) -> WebsocketResult<tungstenite::Message> {
    let bytes = holochain_serialized_bytes::encode(&msg)?;
    Ok(tungstenite::Message::Binary(bytes))
}

/// Set up the tasks that keep a websocket running and produce the public
/// (WebsocketSender, WebsocketReceiver) pair.
pub(crate) fn build_websocket_pair(
    config: Arc<WebsocketConfig>,
    socket: ToFromSocket,
    remote_addr: Url2,
) -> (WebsocketSender, WebsocketReceiver) {
    let (tx_to_socket, rx_to_socket) = tokio::sync::mpsc::channel(config.max_send_queue);
    let (tx_from_socket, rx_from_socket) = tokio::sync::mpsc::channel(config.max_send_queue);
    let pending: Pending = Arc::new(Mutex::new(PendingRequests::new()));

    let (to_socket, from_socket) = socket.split();

    tokio::task::spawn(run_to_socket(to_socket, rx_to_socket));
    tokio::task::spawn(run_from_socket(
        from_socket,
        tx_from_socket,
        tx_to_socket.clone(),
        pending.clone(),
    ));

    (
        WebsocketSender::priv_new(tx_to_socket, pending, config.default_request_timeout),
        WebsocketReceiver::priv_new(remote_addr, rx_from_socket),
    )
}

/// Task that sends outgoing messages to the network.
async fn run_to_socket(
    mut to_socket: impl futures::sink::Sink<tungstenite::Message, Error = tungstenite::Error> + Unpin,
    mut rx_to_socket: RxToSocket,
) {
    tracing::trace!("starting send to external socket");
    while let Some(msg) = rx_to_socket.recv().await {
        match msg {
            OutgoingMessage::Msg(msg) => {
                if let Err(e) = to_socket.send(msg).await {
                    tracing::error!(to_socket_error = ?e);
                    break;
                }
            }
            OutgoingMessage::Close => {
                // Graceful shutdown if we can; if the other side is
                // already gone there is nothing useful to do with the
                // failure.
                to_socket
                    .send(tungstenite::Message::Close(Some(CloseFrame {
                        code: CloseCode::Normal,
                        reason: "shutting down sender".into(),
                    })))
                    .await
                    .ok();
                break;
            }
        }
    }
    to_socket.close().await.ok();
    tracing::trace!("exiting send to external socket");
}

/// Task that takes in messages from the network and routes them: responses
/// to the caller registered under their correlation id, everything else to
/// the [`WebsocketReceiver`] in arrival order.
async fn run_from_socket(
    mut from_socket: impl futures::stream::Stream<
            Item = std::result::Result<tungstenite::Message, tungstenite::Error>,
        > + Unpin,
    tx_from_socket: tokio::sync::mpsc::Sender<WebsocketMessage>,
    tx_to_socket: TxToSocket,
    pending: Pending,
) {
    tracing::trace!("starting receive from external socket");
    loop {
        match from_socket.next().await {
            Some(Ok(tungstenite::Message::Binary(bytes))) => {
                let msg: WireMessage = match holochain_serialized_bytes::decode(&bytes) {
                    Ok(msg) => msg,
                    Err(e) => {
                        // A malformed envelope leaves us with no
                        // correlation id to report the failure to, so
                        // the whole session comes down.
                        tracing::error!(websocket_decode_error = ?e);
                        break;
                    }
                };
                match msg {
                    WireMessage::Response { id, data } => {
                        let respond = pending.lock().pop(id);
                        match respond {
                            Some(respond) => {
                                let data = SerializedBytes::from(UnsafeBytes::from(data));
                                // The caller may have timed out and gone
                                // away; that is not our problem here.
                                respond.send(Ok(data)).ok();
                            }
                            None => {
                                tracing::warn!(
                                    id,
                                    "received response for a request that doesn't exist or has gone stale"
                                );
                            }
                        }
                    }
                    WireMessage::Signal { data } => {
                        let data = SerializedBytes::from(UnsafeBytes::from(data));
                        if tx_from_socket
                            .send(WebsocketMessage::Signal(data))
                            .await
                            .is_err()
                        {
                            // Receiver dropped: the other side still
                            // expects one, so shut the connection down.
                            break;
                        }
                    }
                    WireMessage::Request { id, data } => {
                        let data = SerializedBytes::from(UnsafeBytes::from(data));
                        let respond = incoming_respond(tx_to_socket.clone(), id);
                        if tx_from_socket
                            .send(WebsocketMessage::Request(data, respond))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                }
            }
            Some(Ok(tungstenite::Message::Ping(data))) => {
                tx_to_socket
                    .send(OutgoingMessage::Msg(tungstenite::Message::Pong(data)))
                    .await
                    .ok();
            }
            Some(Ok(tungstenite::Message::Pong(_))) => {}
            Some(Ok(tungstenite::Message::Close(frame))) => {
                let closed = match frame {
                    Some(frame) => WebsocketClosed {
                        code: frame.code.into(),
                        reason: frame.reason.to_string(),
                    },
                    None => WebsocketClosed {
                        code: 0,
                        reason: String::new(),
                    },
                };
                tx_from_socket
                    .send(WebsocketMessage::Close(closed))
                    .await
                    .ok();
                break;
            }
            Some(Ok(msg)) => {
                // Text / raw frames are not part of this protocol.
                tracing::error!("websocket: bad message type {:?}", msg);
            }
            Some(Err(e)) => {
                tracing::error!(websocket_error_from_network = ?e);
                break;
            }
            None => break,
        }
    }
    // The session is over: fail everything still outstanding, exactly
    // once, and let the writer task wind down.
    pending.lock().close();
    tx_to_socket.send(OutgoingMessage::Close).await.ok();
    tracing::trace!("exiting receive from external socket");
}

/// Build the callback that answers an incoming request over this
/// connection, tagged with the id the remote chose.
fn incoming_respond(tx_to_socket: TxToSocket, id: u64) -> WebsocketRespond {
    Box::new(move |msg| {
        async move {
            let data: Vec<u8> = UnsafeBytes::from(msg).into();
            let msg = serialize_wire_message(WireMessage::Response { id, data })?;
            tx_to_socket
                .send(OutgoingMessage::Msg(msg))
                .await
                .map_err(|_| WebsocketError::FailedToSendResp)?;
            tracing::trace!(id, "sent response");
            Ok(())
        }
        .boxed()
    })
}
