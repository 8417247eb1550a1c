use std::sync::Arc;

use futures::stream::StreamExt;
use holochain_conductor_api::AppRequest;
use holochain_conductor_api::AppResponse;
use holochain_conductor_api::InstalledApp;
use holochain_conductor_api::InstalledAppId;
use holochain_conductor_api::ZomeCallInvocation;
use holochain_serialized_bytes::SerializedBytes;
use holochain_websocket::connect;
use holochain_websocket::WebsocketConfig;
use holochain_websocket::WebsocketMessage;
use holochain_websocket::WebsocketSender;
use holochain_zome_types::prelude::*;
use parking_lot::Mutex;
use url2::Url2;

use crate::error::ConductorApiError;
use crate::error::ConductorApiResult;
use crate::util::AbortOnDropHandle;

type SignalHandlers = Arc<Mutex<Vec<Box<dyn Fn(SerializedBytes) + Send + Sync>>>>;

/// A connection to a conductor's app interface.
///
/// Cheaply cloneable; all clones share the one underlying connection and
/// may issue calls concurrently. The connection closes when the last
/// clone drops.
#[derive(Clone)]
pub struct AppWebsocket {
    tx: WebsocketSender,
    signal_handlers: SignalHandlers,
    _listen_handle: Arc<AbortOnDropHandle>,
}

impl AppWebsocket {
    /// Connect to a conductor's app interface at this url.
    pub async fn connect(url: Url2) -> ConductorApiResult<Self> {
        let (tx, mut rx) = connect(url.clone(), Arc::new(WebsocketConfig::default()))
            .await
            .map_err(|_| ConductorApiError::ConnectionError(url))?;

        let signal_handlers: SignalHandlers = Arc::new(Mutex::new(Vec::new()));
        let handlers = signal_handlers.clone();
        let listen_handle = tokio::task::spawn(async move {
            while let Some(msg) = rx.next().await {
                match msg {
                    WebsocketMessage::Signal(data) => {
                        for handler in handlers.lock().iter() {
                            handler(data.clone());
                        }
                    }
                    WebsocketMessage::Close(closed) => {
                        tracing::debug!(?closed, "app interface closed");
                        break;
                    }
                    // The conductor never makes requests of its clients.
                    WebsocketMessage::Request(..) => {
                        tracing::warn!("unexpected request from app interface");
                    }
                }
            }
        });

        Ok(Self {
            tx,
            signal_handlers,
            _listen_handle: Arc::new(AbortOnDropHandle::new(&listen_handle)),
        })
    }

    /// Register a callback for signals emitted on this app interface.
    /// Handlers run in arrival order on the connection's listen task and
    /// receive the signal payload still serialized.
    pub fn on_signal(&self, handler: impl Fn(SerializedBytes) + Send + Sync + 'static) {
        self.signal_handlers.lock().push(Box::new(handler));
    }

    /// Get info about an installed app. `Ok(None)` means no app with this
    /// id exists; that is an answer, not an error.
    pub async fn app_info(
        &self,
        app_id: InstalledAppId,
    ) -> ConductorApiResult<Option<InstalledApp>> {
        let response = self.send(AppRequest::AppInfo { app_id }).await?;
        match response {
            AppResponse::AppInfo(app_info) => Ok(app_info),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    /// Call a zome function.
    ///
    /// The invocation travels exactly as given: no local authorization
    /// check, no defaulting of the capability secret or provenance. The
    /// conductor decides; a rejection comes back as
    /// [`ConductorApiError::ExternalApiWireError`] carrying
    /// [`ZomeCallUnauthorized`](holochain_conductor_api::ExternalApiWireError::ZomeCallUnauthorized).
    pub async fn call_zome(&self, invocation: ZomeCallInvocation) -> ConductorApiResult<ExternIO> {
        let response = self
            .send(AppRequest::ZomeCallInvocation(Box::new(invocation)))
            .await?;
        match response {
            AppResponse::ZomeCallInvoked(payload) => Ok(payload),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    async fn send(&self, msg: AppRequest) -> ConductorApiResult<AppResponse> {
        let request: SerializedBytes = msg.try_into()?;
        let response = self.tx.request_raw(request, None).await?;
        let response: AppResponse = holochain_zome_types::codec::decode(response.bytes())?;
        match response {
            AppResponse::Error(e) => Err(ConductorApiError::ExternalApiWireError(e)),
            _ => Ok(response),
        }
    }
}
