use holochain_serialized_bytes::prelude::*;
use holochain_zome_types::prelude::*;

use crate::app::InstallAppPayload;
use crate::app::InstalledApp;
use crate::app::InstalledAppId;

/// Represents the available conductor functions to call over an admin
/// interface and will result in a corresponding [`AdminResponse`] message
/// being sent back over the interface connection.
///
/// Enum variants follow a general convention of `verb_noun` as opposed to
/// the `noun_verb` of responses.
#[derive(Debug, serde::Serialize, serde::Deserialize, SerializedBytes)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum AdminRequest {
    /// Generate a new [`AgentPubKey`] in the conductor's keystore.
    ///
    /// Will be responded to with an [`AdminResponse::AgentPubKeyGenerated`]
    /// or an [`AdminResponse::Error`].
    GenerateAgentPubKey,

    /// Install an app from a list of dna paths.
    ///
    /// Triggers genesis to be run on all cells and to be stored. An app is
    /// intended for use by one and only one agent and all of its cells
    /// will be initialized with the agent pub key provided here. The app
    /// starts out deactivated; [`AdminRequest::ActivateApp`] activates it.
    ///
    /// Will be responded to with an [`AdminResponse::AppInstalled`]
    /// or an [`AdminResponse::Error`].
    InstallApp(Box<InstallAppPayload>),

    /// Activate an installed app, making its cells callable over any
    /// attached app interface.
    ///
    /// Will be responded to with an [`AdminResponse::AppActivated`]
    /// or an [`AdminResponse::Error`].
    ActivateApp {
        /// The id of the app to activate.
        app_id: InstalledAppId,
    },

    /// Deactivate an app. The app remains installed and can be activated
    /// again.
    ///
    /// Will be responded to with an [`AdminResponse::AppDeactivated`]
    /// or an [`AdminResponse::Error`].
    DeactivateApp {
        /// The id of the app to deactivate.
        app_id: InstalledAppId,
    },

    /// Open up a new websocket for processing [`AppRequest`]s.
    ///
    /// [`AppRequest`]: crate::AppRequest
    ///
    /// Will be responded to with an [`AdminResponse::AppInterfaceAttached`]
    /// carrying the port the new interface listens on.
    AttachAppInterface {
        /// The port to listen on. Use 0 to have the conductor choose a
        /// free port.
        port: u16,
    },

    /// List the hashes of every dna the conductor holds.
    ///
    /// Will be responded to with an [`AdminResponse::DnasListed`].
    ListDnas,

    /// List the ids of every cell across all installed apps.
    ///
    /// Will be responded to with an [`AdminResponse::CellIdsListed`].
    ListCellIds,

    /// List the ids of the apps that are currently active.
    ///
    /// Will be responded to with an [`AdminResponse::ActiveAppsListed`].
    ListActiveApps,

    /// Dump the source chain state of the given cell, for debugging.
    ///
    /// Will be responded to with an [`AdminResponse::StateDumped`].
    DumpState {
        /// The cell to dump state for.
        cell_id: Box<CellId>,
    },
}

/// Represents the possible responses to an [`AdminRequest`].
#[derive(Debug, serde::Serialize, serde::Deserialize, SerializedBytes)]
#[serde(rename_all = "snake_case", tag = "type", content = "data")]
pub enum AdminResponse {
    /// There has been an error in the handling of the request.
    Error(ExternalApiWireError),

    /// The successful response to an [`AdminRequest::GenerateAgentPubKey`].
    AgentPubKeyGenerated(AgentPubKey),

    /// The successful response to an [`AdminRequest::InstallApp`].
    ///
    /// The resulting [`InstalledApp`] holds one `(cell id, nick)` pair per
    /// dna in the install payload, in the same order.
    AppInstalled(InstalledApp),

    /// The successful response to an [`AdminRequest::ActivateApp`].
    AppActivated,

    /// The successful response to an [`AdminRequest::DeactivateApp`].
    AppDeactivated,

    /// The successful response to an [`AdminRequest::AttachAppInterface`].
    AppInterfaceAttached {
        /// The port the new app interface is listening on.
        port: u16,
    },

    /// The successful response to an [`AdminRequest::ListDnas`].
    DnasListed(Vec<DnaHash>),

    /// The successful response to an [`AdminRequest::ListCellIds`].
    CellIdsListed(Vec<CellId>),

    /// The successful response to an [`AdminRequest::ListActiveApps`].
    ActiveAppsListed(Vec<InstalledAppId>),

    /// The successful response to an [`AdminRequest::DumpState`].
    StateDumped(String),
}

/// Error type that goes over the websocket wire.
/// This intends to be application developer facing
/// so it should be readable and relevant.
///
/// The variant names themselves are the wire `type` tags, which is why
/// this enum does not rename to snake_case like the request enums do.
#[derive(Debug, serde::Serialize, serde::Deserialize, SerializedBytes, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum ExternalApiWireError {
    /// Any internal error.
    InternalError(String),

    /// The input to the API failed to deserialize.
    Deserialization(String),

    /// The dna path provided was invalid.
    DnaReadError(String),

    /// There was an error in the ribosome while executing the call.
    RibosomeError(String),

    /// Error activating an app.
    ActivateApp(String),

    /// The zome call was made without a capability that authorizes it.
    /// Carries no detail: which grants exist is not the caller's to know.
    ZomeCallUnauthorized,
}

impl ExternalApiWireError {
    /// Convert the error from the display.
    pub fn internal<T: std::fmt::Display>(e: T) -> Self {
        // Display format is used because
        // this version intended for users.
        ExternalApiWireError::InternalError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmp_serde::Deserializer;
    use serde_json::json;

    fn to_json(bytes: &[u8]) -> serde_json::Value {
        let mut deserializer = Deserializer::new(bytes);
        Deserialize::deserialize(&mut deserializer).unwrap()
    }

    #[test]
    fn admin_request_serialization() {
        // make sure requests are serialized as expected
        let request = AdminRequest::ActivateApp {
            app_id: "some_id".to_string(),
        };
        let serialized_request = holochain_serialized_bytes::encode(&request).unwrap();
        assert_eq!(
            to_json(&serialized_request),
            json!({"type": {"activate_app": null}, "data": {"app_id": "some_id"}})
        );

        // make sure responses are serialized as expected
        let response =
            AdminResponse::Error(ExternalApiWireError::ActivateApp("error_text".to_string()));
        let serialized_response = holochain_serialized_bytes::encode(&response).unwrap();
        assert_eq!(
            to_json(&serialized_response),
            json!({
                "type": {"error": null},
                "data": {"type": {"ActivateApp": null}, "data": "error_text"}
            })
        );
    }

    #[test]
    fn zome_call_unauthorized_wire_tag() {
        // this exact tag is what app developers match against
        let err = ExternalApiWireError::ZomeCallUnauthorized;
        let serialized = holochain_serialized_bytes::encode(&err).unwrap();
        assert_eq!(
            to_json(&serialized),
            json!({"type": {"ZomeCallUnauthorized": null}})
        );

        let decoded: ExternalApiWireError =
            holochain_serialized_bytes::decode(&serialized).unwrap();
        assert_eq!(decoded, err);
    }

    #[test]
    fn admin_request_round_trip() {
        let request = AdminRequest::DumpState {
            cell_id: Box::new(CellId::new(
                DnaHash::from_raw(vec![0xdb; 36]),
                AgentPubKey::from_raw(vec![0xa1; 36]),
            )),
        };
        let bytes = holochain_serialized_bytes::encode(&request).unwrap();
        let decoded: AdminRequest = holochain_serialized_bytes::decode(&bytes).unwrap();
        match decoded {
            AdminRequest::DumpState { cell_id } => {
                assert_eq!(cell_id.dna_hash().get_raw(), &[0xdb; 36]);
            }
            oth => panic!("unexpected: {:?}", oth),
        }
    }
}
