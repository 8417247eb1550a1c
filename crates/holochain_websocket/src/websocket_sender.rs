use std::time::Duration;

use holochain_serialized_bytes::prelude::*;

use crate::websocket::serialize_wire_message;
use crate::websocket::OutgoingMessage;
use crate::websocket::Pending;
use crate::websocket::TxToSocket;
use crate::websocket::WireMessage;
use crate::WebsocketError;
use crate::WebsocketResult;

/// The sending half of an active websocket connection.
///
/// Clone this to issue requests from multiple tasks; all clones
/// multiplex onto the same underlying connection.
#[derive(Clone)]
pub struct WebsocketSender {
    tx_to_socket: TxToSocket,
    pending: Pending,
    default_request_timeout: Option<Duration>,
}

impl WebsocketSender {
    pub(crate) fn priv_new(
        tx_to_socket: TxToSocket,
        pending: Pending,
        default_request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            tx_to_socket,
            pending,
            default_request_timeout,
        }
    }

    /// Emit a fire-and-forget signal to the remote end of this websocket.
    pub async fn signal<S>(&self, msg: S) -> WebsocketResult<()>
    where
        S: std::convert::TryInto<SerializedBytes, Error = SerializedBytesError>,
    {
        self.signal_raw(msg.try_into()?).await
    }

    /// [`signal`](WebsocketSender::signal) on already serialized bytes.
    pub async fn signal_raw(&self, msg: SerializedBytes) -> WebsocketResult<()> {
        let data: Vec<u8> = UnsafeBytes::from(msg).into();
        let msg = serialize_wire_message(WireMessage::Signal { data })?;
        self.tx_to_socket
            .send(OutgoingMessage::Msg(msg))
            .await
            .map_err(|_| WebsocketError::Closed)?;
        Ok(())
    }

    /// Make a request of the remote end of this websocket, awaiting the
    /// response with the configured default timeout (no timeout unless
    /// one was set in the [`WebsocketConfig`](crate::WebsocketConfig)).
    pub async fn request<SB1, SB2>(&self, msg: SB1) -> WebsocketResult<SB2>
    where
        SB1: std::convert::TryInto<SerializedBytes, Error = SerializedBytesError>,
        SB2: std::convert::TryFrom<SerializedBytes, Error = SerializedBytesError>,
    {
        let response = self
            .request_raw(msg.try_into()?, self.default_request_timeout)
            .await?;
        Ok(response.try_into()?)
    }

    /// [`request`](WebsocketSender::request) with an explicit timeout.
    pub async fn request_timeout<SB1, SB2>(
        &self,
        msg: SB1,
        timeout: Duration,
    ) -> WebsocketResult<SB2>
    where
        SB1: std::convert::TryInto<SerializedBytes, Error = SerializedBytesError>,
        SB2: std::convert::TryFrom<SerializedBytes, Error = SerializedBytesError>,
    {
        let response = self.request_raw(msg.try_into()?, Some(timeout)).await?;
        Ok(response.try_into()?)
    }

    /// Make a request on already serialized bytes, returning the response
    /// bytes undecoded. This is the primitive everything else is built on.
    pub async fn request_raw(
        &self,
        msg: SerializedBytes,
        timeout: Option<Duration>,
    ) -> WebsocketResult<SerializedBytes> {
        let (tx_response, rx_response) = tokio::sync::oneshot::channel();

        // The id must be registered before the request bytes hit the
        // network, or a fast response could race the registration.
        let id = match self.pending.lock().register(tx_response) {
            Some(id) => id,
            None => return Err(WebsocketError::Closed),
        };

        let data: Vec<u8> = UnsafeBytes::from(msg).into();
        let msg = serialize_wire_message(WireMessage::Request { id, data })?;
        if self
            .tx_to_socket
            .send(OutgoingMessage::Msg(msg))
            .await
            .is_err()
        {
            self.pending.lock().pop(id);
            return Err(WebsocketError::Closed);
        }
        tracing::trace!(id, "sent request");

        let response = match timeout {
            Some(timeout) => match tokio::time::timeout(timeout, rx_response).await {
                Ok(response) => response,
                Err(_) => {
                    // Nobody is waiting any more; a late response for this
                    // id will be dropped with a warning by the reader task.
                    self.pending.lock().pop(id);
                    return Err(WebsocketError::RequestTimeout);
                }
            },
            None => rx_response.await,
        };

        // A dropped response slot means the connection tore down without
        // getting the chance to fail us explicitly.
        response.map_err(|_| WebsocketError::Closed)?
    }

    /// Shut down this connection. All pending requests fail with
    /// [`WebsocketError::Closed`], as does any request issued after this.
    pub async fn close(&self) {
        self.pending.lock().close();
        self.tx_to_socket.send(OutgoingMessage::Close).await.ok();
    }
}
