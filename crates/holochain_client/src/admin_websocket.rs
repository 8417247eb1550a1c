use std::sync::Arc;

use futures::stream::StreamExt;
use holochain_conductor_api::AdminRequest;
use holochain_conductor_api::AdminResponse;
use holochain_conductor_api::InstallAppPayload;
use holochain_conductor_api::InstalledApp;
use holochain_conductor_api::InstalledAppId;
use holochain_serialized_bytes::SerializedBytes;
use holochain_websocket::connect;
use holochain_websocket::WebsocketConfig;
use holochain_websocket::WebsocketSender;
use holochain_zome_types::prelude::*;
use url2::Url2;

use crate::error::ConductorApiError;
use crate::error::ConductorApiResult;
use crate::util::AbortOnDropHandle;

/// A connection to a conductor's admin interface.
///
/// Cheaply cloneable; all clones share the one underlying connection and
/// may issue calls concurrently. The connection closes when the last
/// clone drops.
#[derive(Clone)]
pub struct AdminWebsocket {
    tx: WebsocketSender,
    _listen_handle: Arc<AbortOnDropHandle>,
}

impl AdminWebsocket {
    /// Connect to a conductor's admin interface at this url.
    ///
    /// Any failure to establish the connection maps to
    /// [`ConductorApiError::ConnectionError`] naming the url, because at
    /// this stage "something went wrong" and "nothing is listening there"
    /// are indistinguishable to the caller.
    pub async fn connect(url: Url2) -> ConductorApiResult<Self> {
        let (tx, mut rx) = connect(url.clone(), Arc::new(WebsocketConfig::default()))
            .await
            .map_err(|_| ConductorApiError::ConnectionError(url))?;

        // The admin interface never emits signals, but close frames and
        // stray messages still need draining or the connection stalls.
        let listen_handle = tokio::task::spawn(async move {
            while let Some(msg) = rx.next().await {
                tracing::trace!(?msg, "admin interface message");
            }
        });

        Ok(Self {
            tx,
            _listen_handle: Arc::new(AbortOnDropHandle::new(&listen_handle)),
        })
    }

    /// Have the conductor generate a new agent key pair in its keystore
    /// and return the public side.
    pub async fn generate_agent_pub_key(&self) -> ConductorApiResult<AgentPubKey> {
        let response = self.send(AdminRequest::GenerateAgentPubKey).await?;
        match response {
            AdminResponse::AgentPubKeyGenerated(key) => Ok(key),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    /// Install an app. The returned [`InstalledApp`] carries one
    /// `(cell id, nick)` pair per dna in the payload, in the same order.
    pub async fn install_app(&self, payload: InstallAppPayload) -> ConductorApiResult<InstalledApp> {
        let response = self
            .send(AdminRequest::InstallApp(Box::new(payload)))
            .await?;
        match response {
            AdminResponse::AppInstalled(app) => Ok(app),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    /// Activate an installed app.
    pub async fn activate_app(&self, app_id: InstalledAppId) -> ConductorApiResult<()> {
        let response = self.send(AdminRequest::ActivateApp { app_id }).await?;
        match response {
            AdminResponse::AppActivated => Ok(()),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    /// Deactivate an app without uninstalling it.
    pub async fn deactivate_app(&self, app_id: InstalledAppId) -> ConductorApiResult<()> {
        let response = self.send(AdminRequest::DeactivateApp { app_id }).await?;
        match response {
            AdminResponse::AppDeactivated => Ok(()),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    /// Attach a new app interface and return the port it listens on.
    /// Pass port 0 to let the conductor choose.
    pub async fn attach_app_interface(&self, port: u16) -> ConductorApiResult<u16> {
        let response = self.send(AdminRequest::AttachAppInterface { port }).await?;
        match response {
            AdminResponse::AppInterfaceAttached { port } => Ok(port),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    /// List the hashes of every dna the conductor holds.
    pub async fn list_dnas(&self) -> ConductorApiResult<Vec<DnaHash>> {
        let response = self.send(AdminRequest::ListDnas).await?;
        match response {
            AdminResponse::DnasListed(dnas) => Ok(dnas),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    /// List every cell id across all installed apps.
    pub async fn list_cell_ids(&self) -> ConductorApiResult<Vec<CellId>> {
        let response = self.send(AdminRequest::ListCellIds).await?;
        match response {
            AdminResponse::CellIdsListed(cell_ids) => Ok(cell_ids),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    /// List the ids of all active apps.
    pub async fn list_active_apps(&self) -> ConductorApiResult<Vec<InstalledAppId>> {
        let response = self.send(AdminRequest::ListActiveApps).await?;
        match response {
            AdminResponse::ActiveAppsListed(app_ids) => Ok(app_ids),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    /// Dump the state of a cell, for debugging.
    pub async fn dump_state(&self, cell_id: CellId) -> ConductorApiResult<String> {
        let response = self
            .send(AdminRequest::DumpState {
                cell_id: Box::new(cell_id),
            })
            .await?;
        match response {
            AdminResponse::StateDumped(state) => Ok(state),
            _ => unreachable!("Unexpected response {:?}", response),
        }
    }

    async fn send(&self, msg: AdminRequest) -> ConductorApiResult<AdminResponse> {
        let request: SerializedBytes = msg.try_into()?;
        let response = self.tx.request_raw(request, None).await?;
        let response: AdminResponse = holochain_zome_types::codec::decode(response.bytes())?;
        match response {
            AdminResponse::Error(e) => Err(ConductorApiError::ExternalApiWireError(e)),
            _ => Ok(response),
        }
    }
}
