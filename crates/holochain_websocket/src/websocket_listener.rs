use std::sync::Arc;

use url2::Url2;

use crate::addr_to_url;
use crate::url_to_addr;
use crate::websocket::build_websocket_pair;
use crate::WebsocketConfig;
use crate::WebsocketReceiver;
use crate::WebsocketResult;
use crate::WebsocketSender;

/// A websocket listening / binding socket.
pub struct WebsocketListener {
    config: Arc<WebsocketConfig>,
    local_addr: Url2,
    socket: tokio::net::TcpListener,
}

impl WebsocketListener {
    /// Bind a new websocket listener to this url. Use port 0 to let the
    /// operating system pick a free port, then read it back from
    /// [`local_addr`](WebsocketListener::local_addr).
    pub async fn bind(url: Url2, config: Arc<WebsocketConfig>) -> WebsocketResult<Self> {
        let addr = url_to_addr(&url).await?;
        let socket = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = addr_to_url(socket.local_addr()?, config.scheme);
        tracing::debug!(%local_addr, "bind");
        Ok(Self {
            config,
            local_addr,
            socket,
        })
    }

    /// The url this listener is bound to.
    pub fn local_addr(&self) -> &Url2 {
        &self.local_addr
    }

    /// The config this listener was created with.
    pub fn get_config(&self) -> Arc<WebsocketConfig> {
        self.config.clone()
    }

    /// Accept the next incoming connection as a (sender, receiver) pair.
    pub async fn accept(&mut self) -> WebsocketResult<(WebsocketSender, WebsocketReceiver)> {
        let (stream, peer_addr) = self.socket.accept().await?;
        let socket = tokio_tungstenite::accept_async(stream).await?;
        let remote_addr = addr_to_url(peer_addr, self.config.scheme);
        tracing::debug!(%remote_addr, "accepted incoming connection");
        Ok(build_websocket_pair(
            self.config.clone(),
            socket,
            remote_addr,
        ))
    }
}
