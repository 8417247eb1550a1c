use holochain_serialized_bytes::prelude::*;
use holochain_zome_types::prelude::*;

use crate::app::InstalledApp;
use crate::app::InstalledAppId;
use crate::ExternalApiWireError;

/// Represents the available conductor functions to call over an app
/// interface and will result in a corresponding [`AppResponse`] message
/// being sent back over the interface connection.
#[derive(Debug, serde::Serialize, serde::Deserialize, SerializedBytes)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum AppRequest {
    /// Get info about the app identified by the given id, including info
    /// about each cell installed by this app.
    ///
    /// Will be responded to with an [`AppResponse::AppInfo`].
    AppInfo {
        /// The id of the app to look up.
        app_id: InstalledAppId,
    },

    /// Call a zome function in a cell of an active app.
    ///
    /// Authorization is decided by the conductor against the grants
    /// committed in the target cell; the invocation travels exactly as
    /// given here.
    ///
    /// Will be responded to with an [`AppResponse::ZomeCallInvoked`]
    /// or an [`AppResponse::Error`].
    ZomeCallInvocation(Box<ZomeCallInvocation>),
}

/// Represents the possible responses to an [`AppRequest`].
#[derive(Debug, serde::Serialize, serde::Deserialize, SerializedBytes)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum AppResponse {
    /// There has been an error in the handling of the request.
    Error(ExternalApiWireError),

    /// The successful response to an [`AppRequest::AppInfo`].
    ///
    /// `None` means there is no installed app with the requested id on
    /// this interface; that is an answer, not an error.
    AppInfo(Option<InstalledApp>),

    /// The successful response to an [`AppRequest::ZomeCallInvocation`].
    ///
    /// The payload is the zome function's return value, still serialized;
    /// only the caller knows the type to decode it to.
    ZomeCallInvoked(ExternIO),
}

/// A zome function call as it travels to the conductor.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, SerializedBytes)]
pub struct ZomeCallInvocation {
    /// The secret backing this call's authorization, if the target
    /// function requires one. `None` claims the function is callable
    /// without a capability; the conductor decides whether that is true.
    pub cap: Option<CapSecret>,

    /// The cell containing the zome to call.
    pub cell_id: CellId,

    /// The zome containing the function.
    pub zome_name: ZomeName,

    /// The function to call.
    pub fn_name: FunctionName,

    /// The serialized argument to the function.
    pub payload: ExternIO,

    /// The agent this call is made on behalf of. Grants with an assignee
    /// list are checked against this key.
    pub provenance: AgentPubKey,
}
